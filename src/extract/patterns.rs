use crate::domain::model::BoundKind;
use crate::extract::context::{ContextFilter, DEFAULT_NARRATIVE_PATTERNS};
use crate::extract::date::{default_month_names, DatePhraseNormalizer};
use crate::extract::duration::{
    DurationExtractor, DEFAULT_MAX_YEARS, DEFAULT_MONTHS_UNITS, DEFAULT_YEARS_UNITS,
};
use crate::extract::salary::{
    BucketScale, SalaryParser, DEFAULT_BREAKPOINTS, DEFAULT_BUCKET_LABELS, DEFAULT_FROM_PREFIXES,
    DEFAULT_UP_TO_PREFIXES,
};
use crate::extract::segmenter::Segmenter;
use crate::extract::tech::{TechMatcher, DEFAULT_TECH_KEYWORDS};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw, serializable vocabulary. Every field falls back to the built-in
/// English/Ukrainian defaults, so a config file only lists what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularySettings {
    pub tech_keywords: Vec<String>,
    pub narrative_patterns: Vec<String>,
    pub years_units: Vec<String>,
    pub months_units: Vec<String>,
    pub max_years: f64,
    pub month_names: BTreeMap<String, u32>,
    pub up_to_prefixes: Vec<String>,
    pub from_prefixes: Vec<String>,
    pub salary_breakpoints: Vec<f64>,
    pub salary_labels: Vec<String>,
}

impl Default for VocabularySettings {
    fn default() -> Self {
        Self {
            tech_keywords: owned(DEFAULT_TECH_KEYWORDS),
            narrative_patterns: owned(DEFAULT_NARRATIVE_PATTERNS),
            years_units: owned(DEFAULT_YEARS_UNITS),
            months_units: owned(DEFAULT_MONTHS_UNITS),
            max_years: DEFAULT_MAX_YEARS,
            month_names: default_month_names(),
            up_to_prefixes: owned(DEFAULT_UP_TO_PREFIXES),
            from_prefixes: owned(DEFAULT_FROM_PREFIXES),
            salary_breakpoints: DEFAULT_BREAKPOINTS.to_vec(),
            salary_labels: owned(DEFAULT_BUCKET_LABELS),
        }
    }
}

impl Validate for VocabularySettings {
    fn validate(&self) -> Result<()> {
        for (field, units) in [
            ("vocabulary.years_units", &self.years_units),
            ("vocabulary.months_units", &self.months_units),
        ] {
            if units.iter().all(|u| u.trim().is_empty()) {
                return Err(EtlError::MissingConfigError {
                    field: field.to_string(),
                });
            }
        }

        validate_range("vocabulary.max_years", self.max_years, 1.0, 100.0)?;
        Ok(())
    }
}

/// Compiled patterns and keyword sets. Built once at startup and shared
/// read-only (usually behind an `Arc`) by every extraction.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    segmenter: Segmenter,
    context: ContextFilter,
    durations: DurationExtractor,
    salary: SalaryParser,
    buckets: BucketScale,
    dates: DatePhraseNormalizer,
    tech: TechMatcher,
}

impl Vocabulary {
    pub fn new(settings: &VocabularySettings) -> Result<Self> {
        settings.validate()?;

        Ok(Self {
            segmenter: Segmenter::new()?,
            context: ContextFilter::new(&settings.narrative_patterns)?,
            durations: DurationExtractor::new(
                &settings.years_units,
                &settings.months_units,
                settings.max_years,
            )?,
            salary: SalaryParser::new(&settings.up_to_prefixes, &settings.from_prefixes)?,
            buckets: BucketScale::new(&settings.salary_breakpoints, &settings.salary_labels)?,
            dates: DatePhraseNormalizer::new(&settings.month_names)?,
            tech: TechMatcher::new(&settings.tech_keywords)?,
        })
    }

    /// The built-in vocabulary.
    pub fn standard() -> Result<Self> {
        Self::new(&VocabularySettings::default())
    }

    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    pub fn context(&self) -> &ContextFilter {
        &self.context
    }

    pub fn durations(&self) -> &DurationExtractor {
        &self.durations
    }

    pub fn salary(&self) -> &SalaryParser {
        &self.salary
    }

    pub fn buckets(&self) -> &BucketScale {
        &self.buckets
    }

    pub fn dates(&self) -> &DatePhraseNormalizer {
        &self.dates
    }

    pub fn tech(&self) -> &TechMatcher {
        &self.tech
    }

    pub fn bucket(&self, value: Option<f64>, kind: BoundKind) -> Option<&str> {
        self.buckets.bucket(value, kind)
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
