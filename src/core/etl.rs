use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting extraction run");

        let postings = self.pipeline.extract().await?;
        tracing::info!("Extracted {} postings", postings.len());

        let result = self.pipeline.transform(postings).await?;
        let failed = result.facts.iter().filter(|f| f.has_errors()).count();
        tracing::info!(
            "Transformed {} postings ({} with field errors)",
            result.facts.len(),
            failed
        );

        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to {} in {:?}", output_path, started.elapsed());

        Ok(output_path)
    }
}
