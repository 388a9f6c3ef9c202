use crate::extract::clean_text;
use crate::utils::error::{EtlError, ExtractionError, Result};
use chrono::NaiveDate;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

const DATE_FORMAT: &str = "%d %m %Y";

/// Genitive month names as they appear in "15 травня 2024".
pub const DEFAULT_MONTH_NAMES: &[(&str, u32)] = &[
    ("січня", 1),
    ("лютого", 2),
    ("березня", 3),
    ("квітня", 4),
    ("травня", 5),
    ("червня", 6),
    ("липня", 7),
    ("серпня", 8),
    ("вересня", 9),
    ("жовтня", 10),
    ("листопада", 11),
    ("грудня", 12),
];

#[derive(Debug, Clone)]
pub struct DatePhraseNormalizer {
    names: Regex,
    numbers: HashMap<String, String>,
}

impl DatePhraseNormalizer {
    pub fn new(month_names: &BTreeMap<String, u32>) -> Result<Self> {
        if month_names.is_empty() {
            return Err(EtlError::MissingConfigError {
                field: "vocabulary.month_names".to_string(),
            });
        }

        let mut numbers = HashMap::with_capacity(month_names.len());
        for (name, month) in month_names {
            if !(1..=12).contains(month) {
                return Err(EtlError::InvalidConfigValueError {
                    field: "vocabulary.month_names".to_string(),
                    value: format!("{} = {}", name, month),
                    reason: "month number must be between 1 and 12".to_string(),
                });
            }
            numbers.insert(name.trim().to_lowercase(), format!("{:02}", month));
        }

        let mut names: Vec<&String> = numbers.keys().collect();
        names.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b)));
        let alternation = names
            .iter()
            .map(|n| regex::escape(n))
            .collect::<Vec<_>>()
            .join("|");

        Ok(Self {
            names: Regex::new(&format!(r"(?i)\b(?:{})\b", alternation))?,
            numbers,
        })
    }

    /// Replaces month names with two-digit numbers; anything else passes
    /// through untouched.
    pub fn normalize<'t>(&self, raw: &'t str) -> Cow<'t, str> {
        self.names.replace_all(raw, |caps: &Captures| {
            let name = &caps[0];
            self.numbers
                .get(&name.to_lowercase())
                .cloned()
                .unwrap_or_else(|| name.to_string())
        })
    }

    /// An empty date is unknown; anything that does not read as
    /// `day month year` after normalization is malformed.
    pub fn parse(&self, raw: &str) -> std::result::Result<Option<NaiveDate>, ExtractionError> {
        let cleaned = clean_text(raw);
        if cleaned.is_empty() {
            return Ok(None);
        }

        let normalized = self.normalize(&cleaned);
        NaiveDate::parse_from_str(normalized.trim(), DATE_FORMAT)
            .map(Some)
            .map_err(|_| ExtractionError::MalformedDate { input: cleaned.clone() })
    }
}

pub fn default_month_names() -> BTreeMap<String, u32> {
    DEFAULT_MONTH_NAMES
        .iter()
        .map(|(name, month)| (name.to_string(), *month))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> DatePhraseNormalizer {
        DatePhraseNormalizer::new(&default_month_names()).unwrap()
    }

    #[test]
    fn test_normalize_month_name() {
        assert_eq!(normalizer().normalize("15 травня 2024"), "15 05 2024");
        assert_eq!(normalizer().normalize("1 Листопада 2023"), "1 11 2023");
        assert_eq!(normalizer().normalize("15 05 2024"), "15 05 2024");
    }

    #[test]
    fn test_parse_localized_date() {
        let date = normalizer().parse("15 травня 2024").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 5, 15));

        let date = normalizer().parse("\u{a0}28 лютого 2025 ").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 2, 28));
    }

    #[test]
    fn test_malformed_date_is_reported() {
        let err = normalizer().parse("вчора").unwrap_err();
        assert_eq!(
            err,
            ExtractionError::MalformedDate {
                input: "вчора".to_string()
            }
        );
        assert!(normalizer().parse("31 лютого 2024").is_err());
    }

    #[test]
    fn test_empty_date_is_absent() {
        assert_eq!(normalizer().parse("  ").unwrap(), None);
    }

    #[test]
    fn test_rejects_out_of_range_month_number() {
        let mut names = default_month_names();
        names.insert("thirteenth".to_string(), 13);
        assert!(DatePhraseNormalizer::new(&names).is_err());
    }
}
