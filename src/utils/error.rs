use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid pattern in vocabulary: {0}")]
    PatternError(#[from] regex::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EtlError::CsvError(_) | EtlError::ProcessingError { .. } => ErrorSeverity::High,
            EtlError::IoError(_) => ErrorSeverity::Critical,
            EtlError::SerializationError(_) => ErrorSeverity::Medium,
            EtlError::PatternError(_)
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::CsvError(_) => {
                "Check that the postings feed is a UTF-8 CSV with a header row"
            }
            EtlError::IoError(_) => "Check that the input file exists and the output path is writable",
            EtlError::SerializationError(_) => "Re-run the pipeline; the summary could not be encoded",
            EtlError::PatternError(_) => {
                "Fix the regular expression in the [vocabulary] section of the config file"
            }
            EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => "Review the command line flags or TOML config",
            EtlError::ProcessingError { .. } => "Lower the worker count or inspect the input data",
        }
    }
}

/// Per-record extraction failure. Attached to a single posting's output and
/// never aborts the rest of the batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("malformed date '{input}' (expected 'day month year')")]
    MalformedDate { input: String },

    #[error("invalid numeric literal '{literal}'")]
    InvalidNumericLiteral { literal: String },
}

pub type Result<T> = std::result::Result<T, EtlError>;
