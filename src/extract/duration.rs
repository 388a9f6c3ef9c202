use crate::domain::model::{DurationUnit, ExperienceDuration};
use crate::utils::error::{ExtractionError, Result};
use regex::Regex;

pub const DEFAULT_YEARS_UNITS: &[&str] = &[
    "years", "year", "yrs", "yr", "y.o.", "y.o", "yo", "років", "роки", "року", "рік", "р.", "р",
];

pub const DEFAULT_MONTHS_UNITS: &[&str] = &[
    "months", "month", "mos", "mo", "місяців", "місяці", "місяця", "місяць", "міс.", "міс",
];

/// Upper bound (exclusive) for a years-derived value.
pub const DEFAULT_MAX_YEARS: f64 = 15.0;

#[derive(Debug, Clone)]
pub struct DurationExtractor {
    years: Regex,
    months: Regex,
    max_years: f64,
}

impl DurationExtractor {
    pub fn new<S: AsRef<str>>(years_units: &[S], months_units: &[S], max_years: f64) -> Result<Self> {
        Ok(Self {
            years: Regex::new(&quantity_pattern(years_units))?,
            months: Regex::new(&quantity_pattern(months_units))?,
            max_years,
        })
    }

    /// Collects every year and month quantity in a requirement statement,
    /// already converted to years.
    pub fn extract(&self, statement: &str) -> std::result::Result<Vec<ExperienceDuration>, ExtractionError> {
        let mut found = Vec::new();

        for caps in self.years.captures_iter(statement) {
            let Some(literal) = caps.get(1) else { continue };
            let value = parse_literal(literal.as_str())?;
            if self.accepts_years(value) {
                found.push(ExperienceDuration {
                    years: value,
                    unit: DurationUnit::Years,
                });
            }
        }

        // Months are not range-checked.
        for caps in self.months.captures_iter(statement) {
            let Some(literal) = caps.get(1) else { continue };
            let value = parse_literal(literal.as_str())?;
            found.push(ExperienceDuration {
                years: value / 12.0,
                unit: DurationUnit::Months,
            });
        }

        Ok(found)
    }

    /// Rejects phone fragments and calendar years that slipped past the
    /// date guard: only `0 < value < max_years` is an experience requirement.
    pub fn accepts_years(&self, value: f64) -> bool {
        value > 0.0 && value < self.max_years
    }
}

/// The conservative reading of several requirements is the largest one.
pub fn aggregate_experience<I>(durations: I) -> Option<f64>
where
    I: IntoIterator<Item = ExperienceDuration>,
{
    durations
        .into_iter()
        .map(|d| d.years)
        .fold(None, |max, years| match max {
            Some(current) if current >= years => Some(current),
            _ => Some(years),
        })
}

/// Parses a numeric literal accepting `,` as the decimal separator.
pub fn parse_literal(literal: &str) -> std::result::Result<f64, ExtractionError> {
    literal
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| ExtractionError::InvalidNumericLiteral {
            literal: literal.to_string(),
        })
}

/// Builds `number [+|plus] unit`. The number must not continue a preceding
/// number, and a unit ending in a letter must end at a word boundary so
/// "5 more" is not "5 mo".
fn quantity_pattern<S: AsRef<str>>(units: &[S]) -> String {
    format!(
        r"(?i)(?:^|[^\d.,])(\d+(?:[.,]\d+)?)\s*(?:\+|plus\b)?\s*(?:{})",
        unit_alternation(units)
    )
}

fn unit_alternation<S: AsRef<str>>(units: &[S]) -> String {
    let mut tokens: Vec<String> = units
        .iter()
        .map(|u| u.as_ref().trim().to_lowercase())
        .filter(|u| !u.is_empty())
        .collect();

    // Longest first so "років" wins over "рок".
    tokens.sort_by(|a, b| {
        b.chars()
            .count()
            .cmp(&a.chars().count())
            .then_with(|| a.cmp(b))
    });
    tokens.dedup();

    tokens
        .iter()
        .map(|token| {
            let escaped = regex::escape(token);
            if token.chars().last().is_some_and(char::is_alphanumeric) {
                format!(r"{}\b", escaped)
            } else {
                escaped
            }
        })
        .collect::<Vec<_>>()
        .join("|")
}
