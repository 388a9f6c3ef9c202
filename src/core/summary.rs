use crate::domain::model::{
    ExperienceCount, LabelCount, PostingFacts, SalaryRangeCount, Summary,
};
use crate::extract::salary::BucketScale;
use chrono::Datelike;
use std::collections::{BTreeMap, HashMap};

pub const TOP_LOCATIONS: usize = 10;
pub const TOP_TECHNOLOGIES: usize = 20;

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub fn summarize(facts: &[PostingFacts], buckets: &BucketScale) -> Summary {
    Summary {
        total_postings: facts.len(),
        postings_with_errors: facts.iter().filter(|f| f.has_errors()).count(),
        experience: experience_counts(facts),
        publishing_dates: date_counts(facts),
        publishing_weekdays: weekday_counts(facts),
        top_locations: top_n(
            facts.iter().flat_map(|f| f.locations.iter().map(String::as_str)),
            TOP_LOCATIONS,
        ),
        salary_ranges: salary_range_counts(facts, buckets),
        top_technologies: top_n(
            facts.iter().flat_map(|f| f.technologies.iter().map(String::as_str)),
            TOP_TECHNOLOGIES,
        ),
    }
}

/// Experience values rounded to two decimals, ascending.
fn experience_counts(facts: &[PostingFacts]) -> Vec<ExperienceCount> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for years in facts
        .iter()
        .filter_map(|f| f.experience_years.as_ref().ok().copied().flatten())
    {
        *counts.entry((years * 100.0).round() as i64).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(hundredths, count)| ExperienceCount {
            years: hundredths as f64 / 100.0,
            count,
        })
        .collect()
}

fn date_counts(facts: &[PostingFacts]) -> Vec<LabelCount> {
    let mut counts = BTreeMap::new();
    for date in facts.iter().filter_map(|f| f.date.as_ref().ok().copied().flatten()) {
        *counts.entry(date).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(date, count)| LabelCount {
            label: date.to_string(),
            count,
        })
        .collect()
}

fn weekday_counts(facts: &[PostingFacts]) -> Vec<LabelCount> {
    let mut counts = [0usize; 7];
    for date in facts.iter().filter_map(|f| f.date.as_ref().ok().copied().flatten()) {
        counts[date.weekday().num_days_from_monday() as usize] += 1;
    }

    WEEKDAYS
        .iter()
        .zip(counts)
        .map(|(day, count)| LabelCount {
            label: day.to_string(),
            count,
        })
        .collect()
}

/// Lower and upper bucket counts side by side, in bucket order.
fn salary_range_counts(facts: &[PostingFacts], buckets: &BucketScale) -> Vec<SalaryRangeCount> {
    buckets
        .labels()
        .iter()
        .map(|label| SalaryRangeCount {
            label: label.clone(),
            lower: facts
                .iter()
                .filter(|f| f.lower_salary_bucket.as_ref() == Some(label))
                .count(),
            upper: facts
                .iter()
                .filter(|f| f.upper_salary_bucket.as_ref() == Some(label))
                .count(),
        })
        .collect()
}

/// Most frequent labels first; ties broken alphabetically.
fn top_n<'a>(labels: impl Iterator<Item = &'a str>, n: usize) -> Vec<LabelCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label).or_default() += 1;
    }

    let mut ranked: Vec<LabelCount> = counts
        .into_iter()
        .map(|(label, count)| LabelCount {
            label: label.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    ranked.truncate(n);
    ranked
}
