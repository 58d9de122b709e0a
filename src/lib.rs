pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use core::{
    chart::build, context::explain, engine::CalculatorEngine, estimator::estimate,
    pipeline::CalculatorPipeline,
};
pub use domain::model::{AiModel, CalculationInput, ChartData, EmissionsReport};
pub use utils::error::{CalcError, Result};
