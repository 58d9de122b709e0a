use crate::core::export;
use crate::core::report;
use crate::core::{CalculationInput, ConfigProvider, EmissionsReport, Pipeline, Storage};
use crate::utils::error::{CalcError, Result};

pub struct CalculatorPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> CalculatorPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CalculatorPipeline<S, C> {
    async fn collect(&self) -> Result<Vec<CalculationInput>> {
        let inputs = self.config.calculations()?;
        if inputs.is_empty() {
            return Err(CalcError::ConfigError {
                message: "No calculations requested".to_string(),
            });
        }
        tracing::debug!("Collected {} calculation input(s)", inputs.len());
        Ok(inputs)
    }

    async fn calculate(&self, inputs: Vec<CalculationInput>) -> Result<Vec<EmissionsReport>> {
        Ok(inputs.iter().map(report::calculate).collect())
    }

    async fn publish(&self, reports: &[EmissionsReport]) -> Result<Vec<String>> {
        export::write_exports(
            &self.storage,
            self.config.output_path(),
            reports,
            self.config.export_formats(),
            self.config.bundle(),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::export::BUNDLE_FILENAME;
    use crate::domain::model::AiModel;
    use std::collections::HashMap;
    use std::io::Read;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }

        async fn file_count(&self) -> usize {
            self.files.lock().await.len()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        inputs: Vec<CalculationInput>,
        formats: Vec<String>,
        bundle: bool,
    }

    impl MockConfig {
        fn repeated(formats: &[&str], bundle: bool) -> Self {
            let mut config = Self::new(formats, bundle);
            config.inputs = vec![
                CalculationInput {
                    queries: 10,
                    model: AiModel::Claude,
                };
                2
            ];
            config
        }

        fn new(formats: &[&str], bundle: bool) -> Self {
            Self {
                inputs: vec![
                    CalculationInput {
                        queries: 10,
                        model: AiModel::ChatGpt4,
                    },
                    CalculationInput {
                        queries: 500,
                        model: AiModel::Gemini,
                    },
                ],
                formats: formats.iter().map(|f| f.to_string()).collect(),
                bundle,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn calculations(&self) -> Result<Vec<CalculationInput>> {
            Ok(self.inputs.clone())
        }

        fn output_path(&self) -> &str {
            "test_output"
        }

        fn export_formats(&self) -> &[String] {
            &self.formats
        }

        fn bundle(&self) -> bool {
            self.bundle
        }
    }

    #[tokio::test]
    async fn test_collect_returns_configured_inputs() {
        let pipeline = CalculatorPipeline::new(MockStorage::new(), MockConfig::new(&[], false));
        let inputs = pipeline.collect().await.unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[1].model, AiModel::Gemini);
    }

    #[tokio::test]
    async fn test_collect_rejects_empty_input() {
        let mut config = MockConfig::new(&[], false);
        config.inputs.clear();
        let pipeline = CalculatorPipeline::new(MockStorage::new(), config);

        assert!(matches!(
            pipeline.collect().await,
            Err(CalcError::ConfigError { .. })
        ));
    }

    #[tokio::test]
    async fn test_calculate_one_report_per_input() {
        let pipeline = CalculatorPipeline::new(MockStorage::new(), MockConfig::new(&[], false));
        let inputs = pipeline.collect().await.unwrap();
        let reports = pipeline.calculate(inputs).await.unwrap();

        assert_eq!(reports.len(), 2);
        assert!((reports[0].emissions_kg - 0.045).abs() < 1e-9);
        assert!((reports[1].emissions_kg - 1.85).abs() < 1e-9);
        assert_eq!(reports[1].chart.values(), [reports[1].emissions_kg, 0.0]);
    }

    #[tokio::test]
    async fn test_publish_without_formats_writes_nothing() {
        let storage = MockStorage::new();
        let pipeline = CalculatorPipeline::new(storage.clone(), MockConfig::new(&[], false));
        let reports = pipeline.calculate(pipeline.collect().await.unwrap()).await.unwrap();

        let written = pipeline.publish(&reports).await.unwrap();
        assert!(written.is_empty());
        assert_eq!(storage.file_count().await, 0);
    }

    #[tokio::test]
    async fn test_publish_separate_files() {
        let storage = MockStorage::new();
        let pipeline =
            CalculatorPipeline::new(storage.clone(), MockConfig::new(&["json", "svg"], false));
        let reports = pipeline.calculate(pipeline.collect().await.unwrap()).await.unwrap();

        let written = pipeline.publish(&reports).await.unwrap();

        assert_eq!(written.len(), 4);
        assert!(written.contains(&"test_output/emissions_chatgpt-4_10.json".to_string()));
        assert!(written.contains(&"test_output/emissions_gemini_500.svg".to_string()));
        assert_eq!(storage.file_count().await, 4);

        let svg = storage.get_file("emissions_gemini_500.svg").await.unwrap();
        let svg = String::from_utf8(svg).unwrap();
        assert!(svg.contains("CO2 Emissions for 500 Queries"));
    }

    #[tokio::test]
    async fn test_publish_bundle() {
        let storage = MockStorage::new();
        let pipeline = CalculatorPipeline::new(
            storage.clone(),
            MockConfig::new(&["json", "csv", "svg"], true),
        );
        let reports = pipeline.calculate(pipeline.collect().await.unwrap()).await.unwrap();

        let written = pipeline.publish(&reports).await.unwrap();
        assert_eq!(written, vec!["test_output/emissions_report.zip".to_string()]);
        assert_eq!(storage.file_count().await, 1);

        let zip_data = storage.get_file(BUNDLE_FILENAME).await.unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
        assert_eq!(archive.len(), 6);

        let mut csv_content = String::new();
        archive
            .by_name("emissions_chatgpt-4_10.csv")
            .unwrap()
            .read_to_string(&mut csv_content)
            .unwrap();
        assert!(csv_content.starts_with("category,value,share,color"));
    }

    #[tokio::test]
    async fn test_publish_rejects_unknown_format() {
        let pipeline =
            CalculatorPipeline::new(MockStorage::new(), MockConfig::new(&["pdf"], false));
        let reports = pipeline.calculate(pipeline.collect().await.unwrap()).await.unwrap();

        assert!(matches!(
            pipeline.publish(&reports).await,
            Err(CalcError::InvalidConfigValueError { .. })
        ));
    }

    #[tokio::test]
    async fn test_publish_repeated_inputs_as_separate_files() {
        let storage = MockStorage::new();
        let pipeline =
            CalculatorPipeline::new(storage.clone(), MockConfig::repeated(&["json"], false));
        let reports = pipeline.calculate(pipeline.collect().await.unwrap()).await.unwrap();

        let written = pipeline.publish(&reports).await.unwrap();

        assert_eq!(
            written,
            vec![
                "test_output/emissions_claude_10.json".to_string(),
                "test_output/emissions_claude_10_2.json".to_string(),
            ]
        );
        assert_eq!(storage.file_count().await, 2);
        assert!(storage.get_file("emissions_claude_10_2.json").await.is_some());
    }

    #[tokio::test]
    async fn test_publish_repeated_inputs_as_bundle() {
        let storage = MockStorage::new();
        let pipeline =
            CalculatorPipeline::new(storage.clone(), MockConfig::repeated(&["json", "svg"], true));
        let reports = pipeline.calculate(pipeline.collect().await.unwrap()).await.unwrap();

        let written = pipeline.publish(&reports).await.unwrap();
        assert_eq!(written, vec!["test_output/emissions_report.zip".to_string()]);

        let zip_data = storage.get_file(BUNDLE_FILENAME).await.unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
        assert_eq!(archive.len(), 4);
        assert!(archive.by_name("emissions_claude_10.json").is_ok());
        assert!(archive.by_name("emissions_claude_10_2.json").is_ok());
        assert!(archive.by_name("emissions_claude_10_2.svg").is_ok());
    }
}
