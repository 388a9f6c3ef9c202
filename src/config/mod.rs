pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::OutputFormat;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{
    validate_extension, validate_path, validate_positive_number, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "vacancy-facts")]
#[command(about = "Extract experience, salary and technology facts from scraped job postings")]
pub struct CliConfig {
    /// CSV feed written by the crawler
    #[arg(short, long, default_value = "vacancies.csv")]
    pub input: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// TOML config file; when given it replaces the flags above
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, value_enum, value_delimiter = ',', default_values = ["csv", "json"])]
    pub formats: Vec<OutputFormat>,

    #[arg(long, default_value = "4")]
    pub workers: usize,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.formats
    }

    fn worker_threads(&self) -> usize {
        self.workers
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        validate_extension("input", &self.input, &["csv"])?;
        validate_path("output_path", &self.output_path)?;
        validate_positive_number("workers", self.workers, 1)?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = CliConfig::parse_from(["vacancy-facts"]);
        assert_eq!(config.input, "vacancies.csv");
        assert_eq!(config.formats, vec![OutputFormat::Csv, OutputFormat::Json]);
        assert_eq!(config.workers, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_overrides_and_validation() {
        let config = CliConfig::parse_from([
            "vacancy-facts",
            "--input",
            "feed.json",
            "--formats",
            "csv",
            "--workers",
            "0",
        ]);
        assert_eq!(config.formats, vec![OutputFormat::Csv]);
        assert!(config.validate().is_err());
    }
}
