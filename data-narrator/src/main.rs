//! data-narrator: analyze a CSV dataset with a chat model and speak the result.

use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use data_narrator::audio::RodioOutput;
use data_narrator::config::{ApiConfig, Config};
use data_narrator::pipeline::Pipeline;

#[derive(Parser, Debug)]
#[command(name = "data-narrator", about = "Analyze a CSV dataset with an LLM and read the answer aloud")]
struct Args {
    /// Path to config.yaml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CSV file to analyze (overrides dataset.path)
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Number of data rows to send (overrides dataset.row_limit)
    #[arg(long)]
    rows: Option<usize>,

    /// Characters per user turn (overrides dataset.chunk_length)
    #[arg(long)]
    chunk_length: Option<usize>,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Keep HTTP internals quiet unless something goes wrong
    let filter = if args.verbose {
        EnvFilter::new("debug,hyper=warn,reqwest=info,symphonia=warn")
    } else {
        EnvFilter::new("info,hyper=warn,reqwest=warn,symphonia=warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match dotenvy::dotenv() {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Failed to load .env: {e}"),
    }

    let mut config = Config::load(args.config.as_deref());
    if let Some(path) = args.dataset {
        config.dataset.path = path;
    }
    if let Some(rows) = args.rows {
        config.dataset.row_limit = rows;
    }
    if let Some(chunk_length) = args.chunk_length {
        config.dataset.chunk_length = chunk_length;
    }
    info!("Dataset: {:?}", config.dataset);

    let api = ApiConfig::from_env(&config.api)?;

    let mut pipeline = Pipeline::new(&config, &api, RodioOutput)?;
    pipeline.run().await?;

    Ok(())
}
