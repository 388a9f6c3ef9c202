use crate::utils::error::Result;
use regex::Regex;
use std::borrow::Cow;

/// DD/MM/YYYY or YYYY/MM/DD with `.`, `/` or `-` separators.
const CALENDAR_DATE: &str =
    r"\b(?:\d{1,2}[./-]\d{1,2}[./-]\d{4}|\d{4}[./-]\d{1,2}[./-]\d{1,2})\b";

/// Phrase families that mark a statement as company narration rather than a
/// requirement of the role.
pub const DEFAULT_NARRATIVE_PATTERNS: &[&str] = &[
    r"\bwe\s+(?:are|were|have|had|work|worked|build|develop|create|provide|offer|help|serve|started|founded|grew)\b",
    r"\bwe['’](?:re|ve)\b",
    r"\bour\s+(?:team|teams|company|product|products|client|clients|customer|customers|office|offices|mission|history|engineers|partner|partners)\b",
    r"\b(?:company|team)\s+(?:has|had|is|was|have|were)\b",
    r"\bfounded\b",
    r"\bon\s+the\s+market\b",
    r"\bми\s+(?:є|маємо|працюємо|створюємо|розробляємо|заснували|допомагаємо|пропонуємо|будуємо)\b",
    r"\bнаш(?:а|ої|у|ій|і|их|ого|им)?\s+(?:команд\w*|компані\w*|продукт\w*|клієнт\w*|офіс\w*|історі\w*)",
    r"\bкомпанія\s+(?:має|є|була|працює)\b",
    r"\bзаснован\w*",
    r"\bна\s+ринку\b",
];

#[derive(Debug, Clone)]
pub struct ContextFilter {
    date_guard: Regex,
    narrative: Option<Regex>,
}

impl ContextFilter {
    pub fn new<S: AsRef<str>>(narrative_patterns: &[S]) -> Result<Self> {
        let families = narrative_patterns
            .iter()
            .map(|p| format!("(?:{})", p.as_ref()))
            .collect::<Vec<_>>()
            .join("|");

        let narrative = if families.is_empty() {
            None
        } else {
            Some(Regex::new(&format!("(?i){}", families))?)
        };

        Ok(Self {
            date_guard: Regex::new(CALENDAR_DATE)?,
            narrative,
        })
    }

    /// Blanks out calendar dates so "01.02.2023" is never read as a quantity.
    pub fn strip_dates<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.date_guard.replace_all(text, " ")
    }

    pub fn is_narrative(&self, statement: &str) -> bool {
        self.narrative
            .as_ref()
            .is_some_and(|narrative| narrative.is_match(statement))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> ContextFilter {
        ContextFilter::new(DEFAULT_NARRATIVE_PATTERNS).unwrap()
    }

    #[test]
    fn test_company_history_is_narrative() {
        let filter = filter();
        assert!(filter.is_narrative("We have been on the market for 10 years"));
        assert!(filter.is_narrative("Our team of 15 engineers"));
        assert!(filter.is_narrative("The company was founded in 2012"));
        assert!(filter.is_narrative("Ми працюємо на ринку понад 10 років"));
        assert!(filter.is_narrative("Наша команда налічує 50 людей"));
    }

    #[test]
    fn test_requirements_are_kept() {
        let filter = filter();
        assert!(!filter.is_narrative("3+ years of commercial experience with Python"));
        assert!(!filter.is_narrative("Досвід роботи від 2 років"));
    }

    #[test]
    fn test_date_guard_removes_calendar_dates() {
        let filter = filter();
        assert_eq!(filter.strip_dates("posted 15.05.2024 today"), "posted   today");
        assert_eq!(filter.strip_dates("since 2019-03-01"), "since  ");
        assert_eq!(filter.strip_dates("2 years"), "2 years");
    }

    #[test]
    fn test_empty_family_list_never_matches() {
        let filter = ContextFilter::new::<&str>(&[]).unwrap();
        assert!(!filter.is_narrative("we are a company"));
    }
}
