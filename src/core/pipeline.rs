use crate::core::summary::summarize;
use crate::core::table::build_cleaned_table;
use crate::core::{ConfigProvider, Pipeline, PostingFacts, RawPosting, Storage, TransformResult};
use crate::domain::model::OutputFormat;
use crate::extract::{extract_posting, Vocabulary};
use crate::utils::error::{EtlError, Result};
use rayon::prelude::*;
use std::path::Path;
use std::sync::Arc;

pub const CLEANED_TABLE_FILE: &str = "cleaned_vacancies.csv";
pub const SUMMARY_FILE: &str = "summary.json";

/// Reads the crawler's CSV feed, extracts facts from every posting in
/// parallel and writes the cleaned table and summary.
pub struct VacancyPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    vocabulary: Arc<Vocabulary>,
    pool: Arc<rayon::ThreadPool>,
}

impl<S: Storage, C: ConfigProvider> VacancyPipeline<S, C> {
    /// Starts the extraction worker pool sized by `worker_threads`; it lives
    /// as long as the pipeline.
    pub fn new(storage: S, config: C, vocabulary: Arc<Vocabulary>) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.worker_threads())
            .thread_name(|i| format!("extract-{}", i))
            .build()
            .map_err(|e| EtlError::ProcessingError {
                message: format!("failed to start worker pool: {}", e),
            })?;

        Ok(Self {
            storage,
            config,
            vocabulary,
            pool: Arc::new(pool),
        })
    }

    /// Fans postings out over the worker pool from a blocking task so the
    /// async runtime keeps serving I/O. Output order matches input order.
    async fn extract_all(
        &self,
        postings: Vec<RawPosting>,
    ) -> Result<(Vec<RawPosting>, Vec<PostingFacts>)> {
        let pool = Arc::clone(&self.pool);
        let vocabulary = Arc::clone(&self.vocabulary);

        tokio::task::spawn_blocking(move || {
            let facts = pool.install(|| {
                postings
                    .par_iter()
                    .map(|posting| extract_posting(&vocabulary, posting))
                    .collect::<Vec<_>>()
            });
            (postings, facts)
        })
        .await
        .map_err(|e| EtlError::ProcessingError {
            message: format!("extraction task failed: {}", e),
        })
    }

    async fn write_output(&self, file_name: &str, data: &[u8]) -> Result<()> {
        let path = Path::new(self.config.output_path()).join(file_name);
        let path = path.to_string_lossy().into_owned();
        tracing::debug!("Writing {} bytes to {}", data.len(), path);
        self.storage.write_file(&path, data).await
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for VacancyPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<RawPosting>> {
        tracing::debug!("Reading postings from {}", self.config.input_path());
        let data = self.storage.read_file(self.config.input_path()).await?;

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(data.as_slice());

        let mut postings = Vec::new();
        for (row, record) in reader.deserialize::<RawPosting>().enumerate() {
            match record {
                Ok(posting) => postings.push(posting),
                // A broken row loses one posting, not the batch.
                Err(e) => tracing::warn!("Skipping malformed row {}: {}", row + 1, e),
            }
        }

        Ok(postings)
    }

    async fn transform(&self, postings: Vec<RawPosting>) -> Result<TransformResult> {
        tracing::debug!(
            "Extracting facts from {} postings on {} workers",
            postings.len(),
            self.config.worker_threads()
        );
        let (postings, facts) = self.extract_all(postings).await?;

        for (posting, fact) in postings.iter().zip(&facts) {
            for error in fact.errors() {
                tracing::warn!("Posting '{}' ({}): {}", posting.name, posting.url, error);
            }
        }

        let csv_output = build_cleaned_table(&facts)?;
        let summary = summarize(&facts, self.vocabulary.buckets());

        Ok(TransformResult {
            facts,
            csv_output,
            summary,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        for format in self.config.output_formats() {
            match format {
                OutputFormat::Csv => {
                    self.write_output(CLEANED_TABLE_FILE, result.csv_output.as_bytes())
                        .await?;
                }
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&result.summary)?;
                    self.write_output(SUMMARY_FILE, json.as_bytes()).await?;
                }
            }
        }

        Ok(self.config.output_path().to_string())
    }
}
