use ai_emissions_calc::app::{display, interactive};
use ai_emissions_calc::core::export;
use ai_emissions_calc::utils::{logger, validation::Validate};
use ai_emissions_calc::{CalcError, CalculatorEngine, CalculatorPipeline, CliConfig, LocalStorage};
use clap::Parser;

fn fail(e: &CalcError) -> ! {
    tracing::error!(
        "❌ Calculation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_logger(config.verbose, config.log_json);

    tracing::info!("Starting ai-emissions-calc");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(&e);
    }

    println!("{}", display::header());

    let written = if config.interactive {
        let defaults = interactive::SessionDefaults {
            model: config.selected_model()?,
            queries: config.queries,
        };
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        let reports = match interactive::run_session(stdin.lock(), stdout.lock(), defaults) {
            Ok(reports) => reports,
            Err(e) => fail(&e),
        };
        tracing::info!("Interactive session ended after {} calculation(s)", reports.len());

        let storage = LocalStorage::new(config.output_path.clone());
        let exported = export::write_exports(
            &storage,
            &config.output_path,
            &reports,
            &config.export,
            config.bundle,
        )
        .await;
        match exported {
            Ok(written) => written,
            Err(e) => fail(&e),
        }
    } else {
        let storage = LocalStorage::new(config.output_path.clone());
        let pipeline = CalculatorPipeline::new(storage, config.clone());
        let engine = CalculatorEngine::new(pipeline);

        match engine.run().await {
            Ok(summary) => {
                for report in &summary.reports {
                    println!("{}", display::render_report(report));
                }
                summary.written
            }
            Err(e) => fail(&e),
        }
    };

    for path in &written {
        println!("📁 Saved: {}", path);
    }

    println!("{}", display::about());
    Ok(())
}
