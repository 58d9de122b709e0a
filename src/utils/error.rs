use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Unknown model: '{model}'")]
    UnknownModel { model: String },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Export,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl CalcError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CalcError::UnknownModel { .. } => ErrorCategory::Input,
            CalcError::ConfigError { .. } | CalcError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            CalcError::ZipError(_)
            | CalcError::CsvError(_)
            | CalcError::SerializationError(_)
            | CalcError::ProcessingError { .. } => ErrorCategory::Export,
            CalcError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Export => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CalcError::UnknownModel { .. } => format!(
                "Choose one of the supported models: {}",
                crate::domain::model::AiModel::names().join(", ")
            ),
            CalcError::InvalidConfigValueError { field, .. } => {
                format!("Check the value given for '{}'", field)
            }
            CalcError::ConfigError { .. } => {
                "Make sure the configuration file exists and is valid TOML".to_string()
            }
            CalcError::IoError(_) => {
                "Check that the output directory exists and is writable".to_string()
            }
            CalcError::ZipError(_) | CalcError::CsvError(_) | CalcError::SerializationError(_) => {
                "Retry the export or choose a different export format".to_string()
            }
            CalcError::ProcessingError { .. } => "Retry the calculation".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CalcError::UnknownModel { model } => {
                format!("'{}' is not a supported AI model", model)
            }
            CalcError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
            CalcError::IoError(e) => format!("Could not read or write a file: {}", e),
            other => other.to_string(),
        }
    }

    /// Process exit code for this error. Always non-zero.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_model_is_high_severity_input_error() {
        let err = CalcError::UnknownModel {
            model: "GPT-9".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.exit_code(), 1);
        assert!(err.recovery_suggestion().contains("ChatGPT-3.5"));
        assert!(err.user_friendly_message().contains("GPT-9"));
    }

    #[test]
    fn test_io_error_maps_to_critical() {
        let err: CalcError = std::io::Error::new(std::io::ErrorKind::Other, "disk full").into();
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_every_error_exits_non_zero() {
        let errors = vec![
            CalcError::UnknownModel {
                model: "GPT-9".to_string(),
            },
            CalcError::ConfigError {
                message: "missing".to_string(),
            },
            CalcError::ProcessingError {
                message: "csv".to_string(),
            },
            std::io::Error::new(std::io::ErrorKind::Other, "disk full").into(),
        ];
        for err in errors {
            assert_ne!(err.exit_code(), 0, "{} exited with success", err);
        }
    }

    #[test]
    fn test_invalid_value_message_names_field() {
        let err = CalcError::InvalidConfigValueError {
            field: "queries".to_string(),
            value: "0".to_string(),
            reason: "Value must be between 1 and 10000".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value '0' for queries: Value must be between 1 and 10000"
        );
        assert_eq!(err.exit_code(), 1);
    }
}
