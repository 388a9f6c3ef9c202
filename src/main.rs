use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use vacancy_facts::core::ConfigProvider;
use vacancy_facts::utils::error::ErrorSeverity;
use vacancy_facts::utils::{logger, validation::Validate};
use vacancy_facts::{
    CliConfig, EtlEngine, LocalStorage, TomlConfig, VacancyPipeline, Vocabulary,
    VocabularySettings,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose, cli.json_logs);
    tracing::info!("Starting vacancy-facts");

    match cli.config.clone() {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path);
            let config = TomlConfig::from_file(&path)
                .with_context(|| format!("failed to load config file '{}'", path))?;
            let settings = config.vocabulary.clone();
            run(config, &settings).await
        }
        None => run(cli, &VocabularySettings::default()).await,
    }
}

async fn run<C>(config: C, settings: &VocabularySettings) -> anyhow::Result<()>
where
    C: ConfigProvider + Validate,
{
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let vocabulary = Vocabulary::new(settings).context("failed to compile vocabulary")?;
    tracing::debug!(
        "Vocabulary ready: {} technology keywords",
        vocabulary.tech().keywords().len()
    );

    let storage = LocalStorage::new(".");
    let pipeline = VacancyPipeline::new(storage, config, Arc::new(vocabulary))
        .context("failed to start extraction workers")?;
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Facts extracted, output saved to: {}", output_path);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "Extraction run failed: {} (severity: {:?})",
                e,
                e.severity()
            );
            tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }
}
