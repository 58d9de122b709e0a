use crate::core::{EmissionsReport, Pipeline};
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub reports: Vec<EmissionsReport>,
    pub written: Vec<String>,
}

pub struct CalculatorEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> CalculatorEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting emissions calculation");

        let inputs = self.pipeline.collect().await?;
        tracing::info!("Collected {} calculation(s)", inputs.len());

        let reports = self.pipeline.calculate(inputs).await?;
        for report in &reports {
            tracing::info!(
                model = %report.model,
                queries = report.queries,
                "{}",
                report.metric_value
            );
        }

        let written = self.pipeline.publish(&reports).await?;
        if !written.is_empty() {
            tracing::info!("Exported {} file(s)", written.len());
        }

        Ok(RunSummary { reports, written })
    }
}
