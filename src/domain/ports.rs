use crate::domain::model::{CalculationInput, EmissionsReport};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// The requested calculations, already validated against the input bounds.
    fn calculations(&self) -> Result<Vec<CalculationInput>>;
    fn output_path(&self) -> &str;
    /// Any of `json`, `csv`, `svg`; empty disables export.
    fn export_formats(&self) -> &[String];
    fn bundle(&self) -> bool;
}

/// One calculation run: gather inputs, compute reports, publish them.
#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn collect(&self) -> Result<Vec<CalculationInput>>;
    async fn calculate(&self, inputs: Vec<CalculationInput>) -> Result<Vec<EmissionsReport>>;
    /// Returns the paths of the files written.
    async fn publish(&self, reports: &[EmissionsReport]) -> Result<Vec<String>>;
}
