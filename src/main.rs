use anyhow::Result;
use clap::Parser;
use log::info;

use graph_bulk::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger to file (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("graph-bulk.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    // Pick up ENTRA_* values from .env before clap resolves env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    info!("Starting graph-bulk");

    cli.run().await
}
