use clap::Parser;
use prereq_etl::core::ConfigProvider;
use prereq_etl::utils::{logger, validation::Validate};
use prereq_etl::{CatalogError, CatalogPipeline, CliConfig, EtlEngine, FetchMode, LocalStorage};

fn exit_with(context: &str, e: &CatalogError) -> ! {
    tracing::error!("❌ {}: {}", context, e);
    eprintln!("❌ {}", e);
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose, config.json_logs);

    tracing::info!("Starting prereq-etl");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        exit_with("Configuration validation failed", &e);
    }

    match config.fetch_mode() {
        FetchMode::Search => tracing::info!("Mode: search endpoint (fast, ~5 seconds)"),
        FetchMode::AllSubjects => {
            tracing::info!("Mode: every subject area individually (slow but thorough)")
        }
    }

    let pipeline = match CatalogPipeline::new(LocalStorage::new(), config) {
        Ok(pipeline) => pipeline,
        Err(e) => exit_with("Pipeline setup failed", &e),
    };
    tracing::info!(
        "Looking for courses that list '{}' as a prerequisite",
        pipeline.target().search_query()
    );

    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(report) => {
            println!("✅ Saved {} courses → {}", report.rows, report.spreadsheet_path.display());
            if let Some(csv_path) = &report.csv_path {
                println!("📁 CSV copy → {}", csv_path.display());
            }
        }
        Err(e) => exit_with("Run failed", &e),
    }
}
