pub mod chart;
pub mod context;
pub mod engine;
pub mod estimator;
pub mod export;
pub mod pipeline;
pub mod report;
pub mod svg;

pub use crate::domain::model::{CalculationInput, EmissionsReport};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
