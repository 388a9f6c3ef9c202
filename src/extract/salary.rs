use crate::domain::model::{BoundKind, SalaryBound};
use crate::extract::clean_text;
use crate::utils::error::{EtlError, ExtractionError, Result};
use regex::Regex;

/// First number, anything non-numeric, optional second number.
const SALARY_NUMBERS: &str = r"(\d+)\D*(\d+)?";

pub const DEFAULT_UP_TO_PREFIXES: &[&str] = &["до", "up to"];
pub const DEFAULT_FROM_PREFIXES: &[&str] = &["від", "from"];

pub const DEFAULT_BREAKPOINTS: &[f64] = &[
    0.0, 500.0, 1000.0, 1500.0, 2000.0, 3000.0, 4000.0, 5000.0, 7000.0,
];

pub const DEFAULT_BUCKET_LABELS: &[&str] = &[
    "0-500",
    "500-1000",
    "1000-1500",
    "1500-2000",
    "2000-3000",
    "3000-4000",
    "4000-5000",
    "5000-7000",
    "7000+",
];

#[derive(Debug, Clone)]
pub struct SalaryParser {
    numbers: Regex,
    up_to_prefixes: Vec<String>,
    from_prefixes: Vec<String>,
}

impl SalaryParser {
    pub fn new<S: AsRef<str>>(up_to_prefixes: &[S], from_prefixes: &[S]) -> Result<Self> {
        Ok(Self {
            numbers: Regex::new(SALARY_NUMBERS)?,
            up_to_prefixes: lowercase_all(up_to_prefixes),
            from_prefixes: lowercase_all(from_prefixes),
        })
    }

    /// Parses a raw salary string. An empty or non-numeric string is an
    /// unlisted salary: both bounds absent.
    pub fn parse(&self, raw: &str) -> std::result::Result<SalaryBound, ExtractionError> {
        let cleaned = clean_text(raw);
        let Some(caps) = self.numbers.captures(&cleaned) else {
            return Ok(SalaryBound::default());
        };

        let mut lower = caps.get(1).map(|m| parse_amount(m.as_str())).transpose()?;
        let mut upper = caps.get(2).map(|m| parse_amount(m.as_str())).transpose()?;

        let lowered = cleaned.to_lowercase();
        if starts_with_any(&lowered, &self.up_to_prefixes) {
            upper = lower;
            lower = None;
        } else if starts_with_any(&lowered, &self.from_prefixes) {
            upper = None;
        }

        Ok(SalaryBound {
            lower: lower.map(correct_magnitude),
            upper: upper.map(correct_magnitude),
        })
    }
}

/// Authors abbreviate: a bare "2" means 2000 and "15" means 1500.
pub fn correct_magnitude(value: f64) -> f64 {
    if value <= 10.0 {
        value * 1000.0
    } else if value <= 100.0 {
        value * 100.0
    } else {
        value
    }
}

/// Ordered, non-overlapping salary ranges. Each breakpoint opens a bucket;
/// the last one is open-ended.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketScale {
    breakpoints: Vec<f64>,
    labels: Vec<String>,
}

impl BucketScale {
    pub fn new<S: AsRef<str>>(breakpoints: &[f64], labels: &[S]) -> Result<Self> {
        if breakpoints.is_empty() || breakpoints.len() != labels.len() {
            return Err(EtlError::ConfigValidationError {
                field: "vocabulary.salary_labels".to_string(),
                message: format!(
                    "expected one label per breakpoint, got {} breakpoints and {} labels",
                    breakpoints.len(),
                    labels.len()
                ),
            });
        }

        if breakpoints.iter().any(|b| !b.is_finite()) || breakpoints.windows(2).any(|w| w[0] >= w[1]) {
            return Err(EtlError::ConfigValidationError {
                field: "vocabulary.salary_breakpoints".to_string(),
                message: "breakpoints must be finite and strictly ascending".to_string(),
            });
        }

        Ok(Self {
            breakpoints: breakpoints.to_vec(),
            labels: labels.iter().map(|l| l.as_ref().to_string()).collect(),
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Lower bounds use `[start, end)`, upper bounds `(start, end]`: a floor
    /// of exactly 500 reads as "500-1000", a ceiling of 500 as "0-500".
    pub fn bucket(&self, value: Option<f64>, kind: BoundKind) -> Option<&str> {
        let value = value.filter(|v| !v.is_nan())?;

        self.labels.iter().enumerate().find_map(|(i, label)| {
            let start = self.breakpoints[i];
            let end = self.breakpoints.get(i + 1).copied().unwrap_or(f64::INFINITY);
            let inside = match kind {
                BoundKind::Lower => start <= value && value < end,
                BoundKind::Upper => start < value && value <= end,
            };
            inside.then_some(label.as_str())
        })
    }
}

fn parse_amount(literal: &str) -> std::result::Result<f64, ExtractionError> {
    literal
        .parse::<f64>()
        .map_err(|_| ExtractionError::InvalidNumericLiteral {
            literal: literal.to_string(),
        })
}

fn starts_with_any(text: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|p| text.starts_with(p.as_str()))
}

fn lowercase_all<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.as_ref().trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> SalaryParser {
        SalaryParser::new(DEFAULT_UP_TO_PREFIXES, DEFAULT_FROM_PREFIXES).unwrap()
    }

    fn scale() -> BucketScale {
        BucketScale::new(DEFAULT_BREAKPOINTS, DEFAULT_BUCKET_LABELS).unwrap()
    }

    #[test]
    fn test_two_sided_range() {
        let bound = parser().parse("$800–1500").unwrap();
        assert_eq!(bound, SalaryBound { lower: Some(800.0), upper: Some(1500.0) });
    }

    #[test]
    fn test_up_to_moves_number_to_upper() {
        let bound = parser().parse("до 1500").unwrap();
        assert_eq!(bound, SalaryBound { lower: None, upper: Some(1500.0) });

        let bound = parser().parse("Up to $4000").unwrap();
        assert_eq!(bound, SalaryBound { lower: None, upper: Some(4000.0) });
    }

    #[test]
    fn test_from_drops_upper() {
        let bound = parser().parse("від 800").unwrap();
        assert_eq!(bound, SalaryBound { lower: Some(800.0), upper: None });

        let bound = parser().parse("від 800 до 1500").unwrap();
        assert_eq!(bound, SalaryBound { lower: Some(800.0), upper: None });
    }

    #[test]
    fn test_magnitude_correction_after_reassignment() {
        let bound = parser().parse("до 5").unwrap();
        assert_eq!(bound, SalaryBound { lower: None, upper: Some(5000.0) });

        assert_eq!(correct_magnitude(2.0), 2000.0);
        assert_eq!(correct_magnitude(15.0), 1500.0);
        assert_eq!(correct_magnitude(100.0), 10000.0);
        assert_eq!(correct_magnitude(3000.0), 3000.0);
    }

    #[test]
    fn test_unlisted_salary_is_absent() {
        assert!(parser().parse("").unwrap().is_empty());
        assert!(parser().parse("за домовленістю").unwrap().is_empty());
    }

    #[test]
    fn test_nbsp_is_normalized() {
        let bound = parser().parse("\u{a0}від\u{a0}2500\u{a0}$").unwrap();
        assert_eq!(bound, SalaryBound { lower: Some(2500.0), upper: None });
    }

    #[test]
    fn test_bucket_boundary_asymmetry() {
        let scale = scale();
        assert_eq!(scale.bucket(Some(500.0), BoundKind::Lower), Some("500-1000"));
        assert_eq!(scale.bucket(Some(500.0), BoundKind::Upper), Some("0-500"));
        assert_eq!(scale.bucket(Some(7000.0), BoundKind::Lower), Some("7000+"));
        assert_eq!(scale.bucket(Some(7000.0), BoundKind::Upper), Some("5000-7000"));
        assert_eq!(scale.bucket(Some(25000.0), BoundKind::Upper), Some("7000+"));
    }

    #[test]
    fn test_bucket_edges_and_absence() {
        let scale = scale();
        assert_eq!(scale.bucket(Some(0.0), BoundKind::Lower), Some("0-500"));
        assert_eq!(scale.bucket(Some(0.0), BoundKind::Upper), None);
        assert_eq!(scale.bucket(None, BoundKind::Lower), None);
        assert_eq!(scale.bucket(Some(f64::NAN), BoundKind::Upper), None);
        assert_eq!(scale.bucket(Some(-10.0), BoundKind::Lower), None);
    }

    #[test]
    fn test_scale_rejects_mismatched_labels() {
        assert!(BucketScale::new(&[0.0, 500.0], &["0-500"]).is_err());
        assert!(BucketScale::new(&[500.0, 0.0], &["a", "b"]).is_err());
    }
}
