//! Fact extraction over raw posting text.
//!
//! Every extractor is a pure function of its input and the shared, read-only
//! [`Vocabulary`]. Absence of a fact is an explicit `None`/empty set, never an
//! error; only malformed dates and unparsable numeric literals surface as
//! [`crate::ExtractionError`].

pub mod context;
pub mod date;
pub mod duration;
pub mod patterns;
pub mod posting;
pub mod salary;
pub mod segmenter;
pub mod tech;

pub use patterns::{Vocabulary, VocabularySettings};
pub use posting::extract_posting;

/// Normalizes crawler text: non-breaking spaces become plain spaces and the
/// ends are trimmed.
pub fn clean_text(value: &str) -> String {
    value.replace('\u{a0}', " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_replaces_nbsp() {
        assert_eq!(clean_text("  від\u{a0}800 $ "), "від 800 $");
        assert_eq!(clean_text(""), "");
    }
}
