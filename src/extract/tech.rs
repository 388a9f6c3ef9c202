use crate::utils::error::Result;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};

/// Word characters plus `.`, `+`, `#`, optionally chained with `/`.
const TECH_TOKEN: &str = r"[\w.+#]+(?:/[\w.+#]+)*";

pub const DEFAULT_TECH_KEYWORDS: &[&str] = &[
    "python", "django", "flask", "fastapi", "aiohttp", "celery", "redis", "postgresql",
    "mysql", "sql", "mongodb", "docker", "kubernetes", "ci/cd", "async", "aws", "gcp",
    "azure", "linux", "git", "pandas", "numpy", "pytorch", "tensorflow", "react",
    "angular", "vue", "javascript", "typescript", "html", "css", "drf", "graphql", "rest",
    "soap", "rabbitmq", "kafka", "elasticsearch",
];

#[derive(Debug, Clone)]
pub struct TechMatcher {
    token: Regex,
    keywords: HashSet<String>,
}

impl TechMatcher {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Result<Self> {
        Ok(Self {
            token: Regex::new(TECH_TOKEN)?,
            keywords: keywords
                .iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        })
    }

    pub fn keywords(&self) -> &HashSet<String> {
        &self.keywords
    }

    /// Lower-cased tokens of `text`. A slash compound such as "python/django"
    /// contributes itself and each of its parts.
    pub fn tokens(&self, text: &str) -> HashSet<String> {
        let lowered = text.to_lowercase();
        let mut tokens = HashSet::new();

        for m in self.token.find_iter(&lowered) {
            // Sentence-final dots belong to the sentence, not the token.
            let token = m.as_str().trim_end_matches('.');
            if token.is_empty() {
                continue;
            }
            if token.contains('/') {
                tokens.extend(
                    token
                        .split('/')
                        .map(|part| part.trim_end_matches('.'))
                        .filter(|part| !part.is_empty())
                        .map(str::to_string),
                );
            }
            tokens.insert(token.to_string());
        }

        tokens
    }

    pub fn matches(&self, text: &str) -> BTreeSet<String> {
        let tokens = self.tokens(text);
        self.keywords
            .iter()
            .filter(|keyword| tokens.contains(keyword.as_str()))
            .cloned()
            .collect()
    }
}
