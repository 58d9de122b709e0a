use crate::domain::model::{ChartData, ChartSlice};

pub const EMISSIONS_LABEL: &str = "AI Query Emissions";
pub const BUDGET_LABEL: &str = "Remaining Carbon Budget";
pub const EMISSIONS_COLOR: &str = "#FF6384";
pub const BUDGET_COLOR: &str = "#36A2EB";

/// Nominal budget the "remaining" slice is measured against.
pub const CARBON_BUDGET_UNIT: f64 = 1.0;

pub fn build(queries: u32, emissions: f64) -> ChartData {
    let remaining = (CARBON_BUDGET_UNIT - emissions).max(0.0);

    ChartData {
        title: format!("CO2 Emissions for {} Queries", queries),
        slices: [
            ChartSlice {
                label: EMISSIONS_LABEL.to_string(),
                value: emissions,
                color: EMISSIONS_COLOR.to_string(),
            },
            ChartSlice {
                label: BUDGET_LABEL.to_string(),
                value: remaining,
                color: BUDGET_COLOR.to_string(),
            },
        ],
    }
}
