use crate::core::{CalculationInput, ConfigProvider};
use crate::domain::model::AiModel;
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::{self, Validate, MAX_QUERIES, MIN_QUERIES};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub calculator: CalculatorConfig,
    pub input: Option<InputConfig>,
    pub scenarios: Vec<ScenarioConfig>,
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatorConfig {
    pub name: String,
    pub description: Option<String>,
}

/// Tighter query bounds; both must stay inside 1..=10000.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub min_queries: Option<u32>,
    pub max_queries: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub name: String,
    pub model: String,
    pub queries: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_path: String,
    #[serde(default)]
    pub formats: Vec<String>,
    pub bundle: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CalcError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OUTPUT_DIR})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CalcError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn query_bounds(&self) -> (u32, u32) {
        let input = self.input.as_ref();
        (
            input.and_then(|i| i.min_queries).unwrap_or(MIN_QUERIES),
            input.and_then(|i| i.max_queries).unwrap_or(MAX_QUERIES),
        )
    }

    pub fn verbose(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.verbose).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("calculator.name", &self.calculator.name)?;
        validation::validate_path("output.output_path", &self.output.output_path)?;
        validation::validate_formats("output.formats", &self.output.formats)?;

        let (min, max) = self.query_bounds();
        validation::validate_queries("input.min_queries", min)?;
        validation::validate_queries("input.max_queries", max)?;
        if min > max {
            return Err(CalcError::InvalidConfigValueError {
                field: "input.min_queries".to_string(),
                value: min.to_string(),
                reason: format!("Must not exceed input.max_queries ({})", max),
            });
        }

        if self.scenarios.is_empty() {
            return Err(CalcError::ConfigError {
                message: "At least one [[scenarios]] entry is required".to_string(),
            });
        }

        for (i, scenario) in self.scenarios.iter().enumerate() {
            validation::validate_non_empty_string(
                &format!("scenarios[{}].name", i),
                &scenario.name,
            )?;
            scenario.model.parse::<AiModel>()?;
            validation::validate_range(
                &format!("scenarios[{}].queries", i),
                scenario.queries,
                min,
                max,
            )?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn calculations(&self) -> Result<Vec<CalculationInput>> {
        self.validate_config()?;
        self.scenarios
            .iter()
            .map(|scenario| {
                Ok(CalculationInput {
                    queries: scenario.queries,
                    model: scenario.model.parse()?,
                })
            })
            .collect()
    }

    fn output_path(&self) -> &str {
        &self.output.output_path
    }

    fn export_formats(&self) -> &[String] {
        &self.output.formats
    }

    fn bundle(&self) -> bool {
        self.output.bundle.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[calculator]
name = "team-usage"
description = "Monthly AI usage"

[[scenarios]]
name = "support bot"
model = "ChatGPT-4"
queries = 10

[[scenarios]]
name = "code review"
model = "Claude"
queries = 1

[output]
output_path = "./reports"
formats = ["json", "svg"]
bundle = true
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = TomlConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.calculator.name, "team-usage");
        assert_eq!(config.scenarios.len(), 2);
        assert_eq!(config.query_bounds(), (1, 10_000));
        assert!(config.bundle());
        assert!(!config.verbose());
        assert!(config.validate().is_ok());

        let inputs = config.calculations().unwrap();
        assert_eq!(inputs[0].model, AiModel::ChatGpt4);
        assert_eq!(inputs[1].model, AiModel::Claude);
        assert_eq!(inputs[1].queries, 1);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("AI_EMISSIONS_TEST_OUTPUT", "/tmp/emissions");

        let toml_content = r#"
[calculator]
name = "env"

[[scenarios]]
name = "one"
model = "Gemini"
queries = 5

[output]
output_path = "${AI_EMISSIONS_TEST_OUTPUT}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.output.output_path, "/tmp/emissions");
        assert!(config.export_formats().is_empty());

        std::env::remove_var("AI_EMISSIONS_TEST_OUTPUT");
    }

    #[test]
    fn test_unknown_model_in_scenario_is_rejected() {
        let toml_content = BASIC.replace("\"Claude\"", "\"Claude-Next\"");
        let config = TomlConfig::from_toml_str(&toml_content).unwrap();

        assert!(matches!(
            config.validate(),
            Err(CalcError::UnknownModel { model }) if model == "Claude-Next"
        ));
    }

    #[test]
    fn test_scenario_outside_custom_bounds() {
        let toml_content = format!("{}\n[input]\nmin_queries = 5\nmax_queries = 100\n", BASIC);
        let config = TomlConfig::from_toml_str(&toml_content).unwrap();

        assert_eq!(config.query_bounds(), (5, 100));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("scenarios[1].queries"));
    }

    #[test]
    fn test_bounds_cannot_widen_range() {
        let toml_content = format!("{}\n[input]\nmax_queries = 50000\n", BASIC);
        let config = TomlConfig::from_toml_str(&toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        assert!(matches!(
            TomlConfig::from_toml_str("[calculator\nname ="),
            Err(CalcError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.calculator.name, "team-usage");
    }
}
