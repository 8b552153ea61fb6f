use clap::Parser;
use log::{ debug, info };
use anyhow::Result;

use mathscribe::{ MathOrchestrator, OpenAiModelClient, PipelineConfig, PipelineOptions };

mod cli;
use cli::{ Commands, MathscribeCli };

#[tokio::main]
async fn main() {
    // Parse the command line arguments
    let cli = MathscribeCli::parse();

    // Setup logging
    setup_logging(&cli.log_level);

    if let Err(e) = run(cli).await {
        cli::ui::print_error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: MathscribeCli) -> Result<()> {
    // Local commands need neither credentials nor config
    match &cli.command {
        Commands::Check { latex } => {
            return cli::commands::check::execute(latex, cli.output_format);
        }
        Commands::Formula { query } => {
            return cli::commands::formula::execute(query, cli.output_format);
        }
        _ => {}
    }

    match dotenv::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) => debug!("No .env file loaded: {}", e),
    }

    let config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            PipelineConfig::from_file(path)?
        }
        None => PipelineConfig::default(),
    };

    setup_telemetry(&config);

    let client = OpenAiModelClient::new(&config)?;
    let pipeline = MathOrchestrator::new(client, PipelineOptions::from(&config));

    match &cli.command {
        Commands::Image { source, save } => {
            cli::commands::solve::execute_image(
                &pipeline,
                source,
                cli.output_format,
                save.as_deref()
            ).await
        }
        Commands::Text { problem, save } => {
            cli::commands::solve::execute_text(
                &pipeline,
                problem.as_deref(),
                cli.output_format,
                save.as_deref()
            ).await
        }
        Commands::Check { .. } | Commands::Formula { .. } => Ok(()),
    }
}

fn setup_logging(log_level: &str) {
    // Set up the logger based on the log level
    let level = match log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };

    env_logger::Builder::new().filter_level(level).init();

    info!("Logger initialized with level: {}", log_level);
}

/// Telemetry is optional; a missing token only disables it
fn setup_telemetry(config: &PipelineConfig) {
    match config.telemetry_token() {
        Some(_) => info!("Telemetry token found; telemetry enabled"),
        None => info!("No telemetry token configured; telemetry disabled"),
    }
}
