use crate::utils::error::ExtractionError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One listing as produced by the crawler feed. Missing columns are empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPosting {
    pub name: String,
    pub company_name: String,
    pub url: String,
    pub company_url: String,
    pub location: String,
    pub date: String,
    pub salary: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Years,
    Months,
}

/// An experience quantity, normalized to years when extracted. `unit` records
/// what the text said.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExperienceDuration {
    pub years: f64,
    pub unit: DurationUnit,
}

/// Salary range in the currency's base unit. `None` on a side means the
/// posting did not state it, never zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SalaryBound {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl SalaryBound {
    pub fn is_empty(&self) -> bool {
        self.lower.is_none() && self.upper.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    Lower,
    Upper,
}

pub type FieldResult<T> = Result<T, ExtractionError>;

/// Everything extracted from one posting. Fallible fields carry their own
/// error so one bad field never hides the others.
#[derive(Debug, Clone, PartialEq)]
pub struct PostingFacts {
    pub experience_years: FieldResult<Option<f64>>,
    pub salary: FieldResult<SalaryBound>,
    pub lower_salary_bucket: Option<String>,
    pub upper_salary_bucket: Option<String>,
    pub technologies: BTreeSet<String>,
    pub date: FieldResult<Option<NaiveDate>>,
    pub locations: Vec<String>,
}

impl PostingFacts {
    pub fn errors(&self) -> Vec<&ExtractionError> {
        [
            self.experience_years.as_ref().err(),
            self.salary.as_ref().err(),
            self.date.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceCount {
    pub years: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryRangeCount {
    pub label: String,
    pub lower: usize,
    pub upper: usize,
}

/// Tabulations handed to the charting layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total_postings: usize,
    pub postings_with_errors: usize,
    pub experience: Vec<ExperienceCount>,
    pub publishing_dates: Vec<LabelCount>,
    pub publishing_weekdays: Vec<LabelCount>,
    pub top_locations: Vec<LabelCount>,
    pub salary_ranges: Vec<SalaryRangeCount>,
    pub top_technologies: Vec<LabelCount>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub facts: Vec<PostingFacts>,
    pub csv_output: String,
    pub summary: Summary,
}
