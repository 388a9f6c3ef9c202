use crate::domain::model::PostingFacts;
use crate::utils::error::{EtlError, Result};
use std::collections::BTreeSet;

pub const TECH_PREFIX: &str = "tech_";
pub const LOCATION_PREFIX: &str = "loc_";

/// Renders the cleaned table: scalar facts first, then one multi-hot column
/// per technology and per location seen anywhere in the batch.
pub fn build_cleaned_table(facts: &[PostingFacts]) -> Result<String> {
    let technologies: BTreeSet<&str> = facts
        .iter()
        .flat_map(|f| f.technologies.iter().map(String::as_str))
        .collect();
    let locations: BTreeSet<&str> = facts
        .iter()
        .flat_map(|f| f.locations.iter().map(String::as_str))
        .collect();

    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec![
        "experience_years".to_string(),
        "date".to_string(),
        "lower_salary_range".to_string(),
        "upper_salary_range".to_string(),
        "errors".to_string(),
    ];
    header.extend(technologies.iter().map(|t| format!("{}{}", TECH_PREFIX, t)));
    header.extend(locations.iter().map(|l| format!("{}{}", LOCATION_PREFIX, l)));
    writer.write_record(&header)?;

    for fact in facts {
        let mut row = vec![
            fact.experience_years
                .as_ref()
                .ok()
                .copied()
                .flatten()
                .map(|years| years.to_string())
                .unwrap_or_default(),
            fact.date
                .as_ref()
                .ok()
                .copied()
                .flatten()
                .map(|date| date.to_string())
                .unwrap_or_default(),
            fact.lower_salary_bucket.clone().unwrap_or_default(),
            fact.upper_salary_bucket.clone().unwrap_or_default(),
            fact.errors()
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; "),
        ];
        row.extend(technologies.iter().map(|t| flag(fact.technologies.contains(*t))));
        row.extend(locations.iter().map(|l| flag(fact.locations.iter().any(|x| x == l))));
        writer.write_record(&row)?;
    }

    let bytes = writer.into_inner().map_err(|e| EtlError::ProcessingError {
        message: format!("failed to flush cleaned table: {}", e),
    })?;

    String::from_utf8(bytes).map_err(|e| EtlError::ProcessingError {
        message: format!("cleaned table is not valid UTF-8: {}", e),
    })
}

fn flag(present: bool) -> String {
    if present { "1" } else { "0" }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SalaryBound;
    use crate::utils::error::ExtractionError;
    use chrono::NaiveDate;

    fn facts(technologies: &[&str], locations: &[&str]) -> PostingFacts {
        PostingFacts {
            experience_years: Ok(Some(1.5)),
            salary: Ok(SalaryBound::default()),
            lower_salary_bucket: Some("500-1000".to_string()),
            upper_salary_bucket: None,
            technologies: technologies.iter().map(|t| t.to_string()).collect(),
            date: Ok(NaiveDate::from_ymd_opt(2024, 5, 15)),
            locations: locations.iter().map(|l| l.to_string()).collect(),
        }
    }

    #[test]
    fn test_multi_hot_columns() {
        let rows = vec![facts(&["python"], &["Kyiv"]), facts(&["django", "python"], &["Lviv"])];
        let table = build_cleaned_table(&rows).unwrap();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(
            lines[0],
            "experience_years,date,lower_salary_range,upper_salary_range,errors,tech_django,tech_python,loc_Kyiv,loc_Lviv"
        );
        assert_eq!(lines[1], "1.5,2024-05-15,500-1000,,,0,1,1,0");
        assert_eq!(lines[2], "1.5,2024-05-15,500-1000,,,1,1,0,1");
    }

    #[test]
    fn test_errors_column() {
        let mut row = facts(&[], &["unknown"]);
        row.date = Err(ExtractionError::MalformedDate {
            input: "вчора".to_string(),
        });
        let table = build_cleaned_table(&[row]).unwrap();
        let line = table.lines().nth(1).unwrap();
        assert!(line.starts_with("1.5,,500-1000,,malformed date 'вчора'"));
    }
}
