use crate::domain::model::AiModel;
use crate::utils::error::Result;

/// Total kg CO2 for `queries` queries against the named model.
///
/// The name must be one of [`AiModel::names`] exactly (surrounding
/// whitespace is ignored); anything else is `CalcError::UnknownModel`.
/// No rounding is applied here.
pub fn estimate(queries: u32, model: &str) -> Result<f64> {
    let model: AiModel = model.parse()?;
    Ok(estimate_for(queries, model))
}

pub fn estimate_for(queries: u32, model: AiModel) -> f64 {
    f64::from(queries) * model.emission_factor()
}
