use crate::utils::error::{EtlError, Result};
use std::fmt::Display;
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn rejected(field: &str, value: impl Display, reason: impl Into<String>) -> EtlError {
    EtlError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_path(field: &str, path: &str) -> Result<()> {
    match path {
        "" => Err(rejected(field, path, "path is empty")),
        p if p.contains('\0') => Err(rejected(
            field,
            path.escape_debug(),
            "path contains a NUL byte",
        )),
        _ => Ok(()),
    }
}

pub fn validate_positive_number(field: &str, value: usize, min: usize) -> Result<()> {
    if value >= min {
        Ok(())
    } else {
        Err(rejected(field, value, format!("must be {} or more", min)))
    }
}

/// Accepts `path` only when its extension is one of `allowed`, compared
/// case-insensitively ("feed.CSV" passes for `["csv"]`).
pub fn validate_extension(field: &str, path: &str, allowed: &[&str]) -> Result<()> {
    let extension = Path::new(path).extension().and_then(|ext| ext.to_str());
    match extension {
        Some(ext) if allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)) => Ok(()),
        Some(ext) => Err(rejected(
            field,
            path,
            format!("'.{}' is not one of: {}", ext, allowed.join(", ")),
        )),
        None => Err(rejected(field, path, "file name has no extension")),
    }
}

pub fn validate_non_empty_string(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(rejected(field, value, "must contain non-whitespace text"));
    }
    Ok(())
}

/// Inclusive on both ends. NaN is rejected.
pub fn validate_range<T>(field: &str, value: T, min: T, max: T) -> Result<()>
where
    T: PartialOrd + Display + Copy,
{
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(rejected(field, value, format!("must lie within {}..={}", min, max)))
    }
}
