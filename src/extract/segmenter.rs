use crate::utils::error::Result;
use regex::Regex;

/// Newline, semicolon, or a period followed by whitespace. A dot inside a
/// token ("y.o", "node.js", "15.05.2024") does not end a statement.
const STATEMENT_BREAK: &str = r"[\n;]|\.\s+";

#[derive(Debug, Clone)]
pub struct Segmenter {
    splitter: Regex,
}

impl Segmenter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            splitter: Regex::new(STATEMENT_BREAK)?,
        })
    }

    /// Returns the statements of `text`. The result is lazy and can be
    /// iterated any number of times.
    pub fn segment<'a>(&'a self, text: &'a str) -> Statements<'a> {
        Statements {
            splitter: &self.splitter,
            text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statement<'a> {
    pub position: usize,
    pub text: &'a str,
}

impl Statement<'_> {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Statements<'a> {
    splitter: &'a Regex,
    text: &'a str,
}

impl<'a> Statements<'a> {
    pub fn iter(&self) -> StatementIter<'a> {
        StatementIter {
            inner: self.splitter.split(self.text).enumerate(),
        }
    }
}

impl<'a> IntoIterator for Statements<'a> {
    type Item = Statement<'a>;
    type IntoIter = StatementIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct StatementIter<'a> {
    inner: std::iter::Enumerate<regex::Split<'a, 'a>>,
}

impl<'a> Iterator for StatementIter<'a> {
    type Item = Statement<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(position, text)| Statement { position, text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(segmenter: &Segmenter, input: &str) -> Vec<String> {
        segmenter
            .segment(input)
            .iter()
            .map(|s| s.text.to_string())
            .collect()
    }

    #[test]
    fn test_splits_on_newline_semicolon_and_sentence_end() {
        let segmenter = Segmenter::new().unwrap();
        let parts = texts(
            &segmenter,
            "3+ years of Python. Django; FastAPI\nEnglish B2",
        );
        assert_eq!(parts, vec!["3+ years of Python", "Django", " FastAPI", "English B2"]);
    }

    #[test]
    fn test_inner_dots_do_not_split() {
        let segmenter = Segmenter::new().unwrap();
        let parts = texts(&segmenter, "Node.js and 1.5 years with v2.0");
        assert_eq!(parts, vec!["Node.js and 1.5 years with v2.0"]);
    }

    #[test]
    fn test_no_separator_yields_whole_input() {
        let segmenter = Segmenter::new().unwrap();
        assert_eq!(texts(&segmenter, "Python developer"), vec!["Python developer"]);
        assert_eq!(texts(&segmenter, ""), vec![""]);
    }

    #[test]
    fn test_statements_are_restartable() {
        let segmenter = Segmenter::new().unwrap();
        let statements = segmenter.segment("a; b; c");
        let first: Vec<_> = statements.iter().collect();
        let second: Vec<_> = statements.into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first[2].position, 2);
        assert!(Statement { position: 0, text: "  " }.is_blank());
    }
}
