use crate::domain::model::{BoundKind, FieldResult, PostingFacts, RawPosting};
use crate::extract::clean_text;
use crate::extract::duration::aggregate_experience;
use crate::extract::patterns::Vocabulary;

/// Location recorded when the crawler found none.
pub const UNKNOWN_LOCATION: &str = "unknown";

/// Runs every extractor over one posting. Never fails as a whole: field
/// failures are kept on the returned facts.
pub fn extract_posting(vocabulary: &Vocabulary, posting: &RawPosting) -> PostingFacts {
    let description = clean_text(&posting.description);

    let salary = vocabulary.salary().parse(&posting.salary);
    let (lower_salary_bucket, upper_salary_bucket) = match &salary {
        Ok(bound) => (
            vocabulary
                .bucket(bound.lower, BoundKind::Lower)
                .map(str::to_string),
            vocabulary
                .bucket(bound.upper, BoundKind::Upper)
                .map(str::to_string),
        ),
        Err(_) => (None, None),
    };

    PostingFacts {
        experience_years: extract_experience(vocabulary, &description),
        salary,
        lower_salary_bucket,
        upper_salary_bucket,
        technologies: vocabulary.tech().matches(&description),
        date: vocabulary.dates().parse(&posting.date),
        locations: split_locations(&posting.location),
    }
}

/// Date guard, segmentation, narrative filter, duration matching, then the
/// maximum across all requirement statements.
pub fn extract_experience(vocabulary: &Vocabulary, description: &str) -> FieldResult<Option<f64>> {
    let guarded = vocabulary.context().strip_dates(description);
    let mut durations = Vec::new();

    for statement in vocabulary.segmenter().segment(&guarded) {
        if statement.is_blank() || vocabulary.context().is_narrative(statement.text) {
            continue;
        }
        durations.extend(vocabulary.durations().extract(statement.text)?);
    }

    Ok(aggregate_experience(durations))
}

/// "Київ, Львів, віддалено" becomes three locations; a missing location is
/// recorded as unknown.
pub fn split_locations(raw: &str) -> Vec<String> {
    let cleaned = clean_text(raw);
    if cleaned.is_empty() {
        return vec![UNKNOWN_LOCATION.to_string()];
    }

    cleaned
        .split(", ")
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SalaryBound;
    use crate::utils::error::ExtractionError;
    use chrono::NaiveDate;

    fn vocabulary() -> Vocabulary {
        Vocabulary::standard().unwrap()
    }

    #[test]
    fn test_narrative_years_never_count() {
        let v = vocabulary();
        let text = "We have been on the market for 10 years. 2+ years with Python required.";
        assert_eq!(extract_experience(&v, text), Ok(Some(2.0)));

        let only_narrative = "We have been on the market for 10 years";
        assert_eq!(extract_experience(&v, only_narrative), Ok(None));
    }

    #[test]
    fn test_maximum_across_statements() {
        let v = vocabulary();
        let text = "At least 1 year with Django\n3 years of Python\n6 months of AWS";
        assert_eq!(extract_experience(&v, text), Ok(Some(3.0)));
    }

    #[test]
    fn test_abbreviated_ukrainian_years_survive_segmentation() {
        let v = vocabulary();
        assert_eq!(extract_experience(&v, "2 р. досвіду"), Ok(Some(2.0)));
        assert_eq!(extract_experience(&v, "Досвід 3 р. з Python"), Ok(Some(3.0)));
        assert_eq!(extract_experience(&v, "5 y.o. experience"), Ok(Some(5.0)));
    }

    #[test]
    fn test_blank_statements_are_skipped() {
        let v = vocabulary();
        assert_eq!(extract_experience(&v, "\n\n;  ;\n2 years"), Ok(Some(2.0)));
        assert_eq!(extract_experience(&v, "  \n "), Ok(None));
    }

    #[test]
    fn test_months_alone() {
        assert_eq!(extract_experience(&vocabulary(), "24 months"), Ok(Some(2.0)));
    }

    #[test]
    fn test_calendar_dates_are_not_durations() {
        let v = vocabulary();
        assert_eq!(extract_experience(&v, "Start date 01.09.2024 years ahead"), Ok(None));
    }

    #[test]
    fn test_invalid_literal_is_reported() {
        let v = vocabulary();
        let result = extract_experience(&v, "٣ years of Python");
        assert!(matches!(result, Err(ExtractionError::InvalidNumericLiteral { .. })));
    }

    #[test]
    fn test_full_posting() {
        let v = vocabulary();
        let posting = RawPosting {
            description: "Досвід роботи з Python від 3 років; Django, FastAPI, Docker".to_string(),
            salary: "$2500–3500".to_string(),
            date: "15 травня 2024".to_string(),
            location: "Київ, віддалено".to_string(),
            ..RawPosting::default()
        };

        let facts = extract_posting(&v, &posting);
        assert_eq!(facts.experience_years, Ok(Some(3.0)));
        assert_eq!(
            facts.salary,
            Ok(SalaryBound {
                lower: Some(2500.0),
                upper: Some(3500.0)
            })
        );
        assert_eq!(facts.lower_salary_bucket.as_deref(), Some("2000-3000"));
        assert_eq!(facts.upper_salary_bucket.as_deref(), Some("3000-4000"));
        assert_eq!(
            facts.technologies.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["django", "docker", "fastapi", "python"]
        );
        assert_eq!(facts.date, Ok(NaiveDate::from_ymd_opt(2024, 5, 15)));
        assert_eq!(facts.locations, vec!["Київ", "віддалено"]);
        assert!(!facts.has_errors());
    }

    #[test]
    fn test_bad_date_does_not_hide_other_fields() {
        let v = vocabulary();
        let posting = RawPosting {
            description: "5 years of Flask".to_string(),
            date: "вчора".to_string(),
            ..RawPosting::default()
        };

        let facts = extract_posting(&v, &posting);
        assert_eq!(facts.experience_years, Ok(Some(5.0)));
        assert!(facts.salary.as_ref().unwrap().is_empty());
        assert_eq!(facts.lower_salary_bucket, None);
        assert_eq!(facts.errors().len(), 1);
        assert_eq!(facts.locations, vec![UNKNOWN_LOCATION]);
    }
}
