pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::{CalculationInput, ConfigProvider};
#[cfg(feature = "cli")]
use crate::domain::model::AiModel;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "ai-emissions-calc")]
#[command(about = "Estimate the CO2 emissions of AI model queries")]
pub struct CliConfig {
    /// AI model: ChatGPT-3.5, ChatGPT-4, Claude or Gemini
    #[arg(short, long, default_value = "ChatGPT-3.5")]
    pub model: String,

    /// Number of queries (1-10000)
    #[arg(short, long, default_value = "10")]
    pub queries: u32,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Export formats: json, csv, svg
    #[arg(long, value_delimiter = ',')]
    pub export: Vec<String>,

    #[arg(long, help = "Pack exported files into a single zip")]
    pub bundle: bool,

    #[arg(short, long, help = "Prompt for inputs instead of reading flags")]
    pub interactive: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn selected_model(&self) -> Result<AiModel> {
        self.model.parse()
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn calculations(&self) -> Result<Vec<CalculationInput>> {
        validation::validate_queries("queries", self.queries)?;
        Ok(vec![CalculationInput {
            queries: self.queries,
            model: self.selected_model()?,
        }])
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn export_formats(&self) -> &[String] {
        &self.export
    }

    fn bundle(&self) -> bool {
        self.bundle
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_formats("export", &self.export)?;

        // Interactive sessions only use these as prompt defaults
        self.selected_model()?;
        validation::validate_queries("queries", self.queries)?;
        Ok(())
    }
}
