use ai_emissions_calc::app::display;
use ai_emissions_calc::config::toml_config::TomlConfig;
use ai_emissions_calc::core::ConfigProvider;
use ai_emissions_calc::domain::model::AiModel;
use ai_emissions_calc::utils::{logger, validation::Validate};
use ai_emissions_calc::{CalculatorEngine, CalculatorPipeline, LocalStorage};
use anyhow::Context;
use clap::Parser;

#[derive(Parser)]
#[command(name = "toml-calc")]
#[command(about = "Run emissions calculations described in a TOML file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "emissions.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the output directory from config
    #[arg(long)]
    output_path: Option<String>,

    /// Override the bundle setting from config
    #[arg(long)]
    bundle: Option<bool>,

    /// Show what would be calculated without writing any files
    #[arg(long)]
    dry_run: bool,
}

fn display_config_summary(config: &TomlConfig) {
    let (min, max) = config.query_bounds();
    println!("📋 {}", config.calculator.name);
    if let Some(description) = &config.calculator.description {
        println!("   {}", description);
    }
    println!("   Scenarios: {}", config.scenarios.len());
    println!("   Query bounds: {}-{}", min, max);
    println!("   Output: {}", config.output_path());
    if config.export_formats().is_empty() {
        println!("   Export: none");
    } else {
        println!(
            "   Export: {}{}",
            config.export_formats().join(", "),
            if config.bundle() { " (zip bundle)" } else { "" }
        );
    }
    println!();
}

fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    for scenario in &config.scenarios {
        let model: AiModel = scenario.model.parse()?;
        println!(
            "  • {}: {} queries on {} ({} kg CO2 per query)",
            scenario.name,
            scenario.queries,
            model,
            model.emission_factor()
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    logger::init_logger(args.verbose || config.verbose(), config.json_logs());
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(output_path) = args.output_path {
        tracing::info!("🔧 Output path overridden to: {}", output_path);
        config.output.output_path = output_path;
    }
    if let Some(bundle) = args.bundle {
        tracing::info!("🔧 Bundle overridden to: {}", bundle);
        config.output.bundle = Some(bundle);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        return perform_dry_run(&config);
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = CalculatorPipeline::new(storage, config.clone());
    let engine = CalculatorEngine::new(pipeline);

    match engine.run().await {
        Ok(summary) => {
            for (scenario, report) in config.scenarios.iter().zip(&summary.reports) {
                println!("── {} ──", scenario.name);
                println!("{}", display::render_report(report));
            }

            let total: f64 = summary.reports.iter().map(|r| r.emissions_kg).sum();
            println!("Total across scenarios: {:.4} kg CO2", total);

            for path in &summary.written {
                println!("📁 Saved: {}", path);
            }
            tracing::info!("✅ {} scenario(s) calculated", summary.reports.len());
        }
        Err(e) => {
            tracing::error!(
                "❌ Calculation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            return Err(e).context("emissions calculation failed");
        }
    }

    Ok(())
}
