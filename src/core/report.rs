use chrono::Utc;

use crate::core::{chart, context, estimator};
use crate::domain::model::{CalculationInput, EmissionsReport};

pub fn metric_label(input: &CalculationInput) -> String {
    format!(
        "Estimated CO2 Emissions for {} {} Queries",
        input.queries, input.model
    )
}

pub fn metric_value(emissions: f64) -> String {
    format!("{:.4} kg CO2", emissions)
}

/// Runs estimator, context and chart for one input.
pub fn calculate(input: &CalculationInput) -> EmissionsReport {
    let emissions = estimator::estimate_for(input.queries, input.model);
    tracing::debug!(
        model = %input.model,
        queries = input.queries,
        emissions_kg = emissions,
        "Estimated emissions"
    );

    EmissionsReport {
        model: input.model,
        queries: input.queries,
        emissions_kg: emissions,
        metric_label: metric_label(input),
        metric_value: metric_value(emissions),
        context: context::explain(emissions),
        chart: chart::build(input.queries, emissions),
        generated_at: Utc::now(),
    }
}
