pub mod config;
pub mod core;
pub mod domain;
pub mod extract;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::{etl::EtlEngine, pipeline::VacancyPipeline};
pub use crate::domain::model::{PostingFacts, RawPosting, SalaryBound};
pub use crate::extract::{extract_posting, Vocabulary, VocabularySettings};
pub use crate::utils::error::{EtlError, ExtractionError, Result};
