use crate::core::export;
use crate::utils::error::{CalcError, Result};

/// Inclusive bounds for the query count accepted at the input boundary.
pub const MIN_QUERIES: u32 = 1;
pub const MAX_QUERIES: u32 = 10_000;
pub const DEFAULT_QUERIES: u32 = 10;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(CalcError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CalcError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CalcError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(CalcError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_queries(field_name: &str, queries: u32) -> Result<()> {
    validate_range(field_name, queries, MIN_QUERIES, MAX_QUERIES)
}

/// Same rules as the export step, reported against `field_name`.
pub fn validate_formats(field_name: &str, formats: &[String]) -> Result<()> {
    export::parse_formats(formats)
        .map(|_| ())
        .map_err(|e| match e {
            CalcError::InvalidConfigValueError { value, reason, .. } => {
                CalcError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value,
                    reason,
                }
            }
            other => other,
        })
}

/// Parses a query count typed by a user, applying the input-boundary range.
pub fn parse_queries(field_name: &str, raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    let queries = trimmed
        .parse::<u32>()
        .map_err(|_| CalcError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: trimmed.to_string(),
            reason: "Value must be a whole number".to_string(),
        })?;
    validate_queries(field_name, queries)?;
    Ok(queries)
}
