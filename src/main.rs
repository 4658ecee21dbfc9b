//! Yatracker CLI entry point.

use anyhow::Result;
use clap::Parser;

use yatracker::cli::{commands, handle_error, Cli};
use yatracker::infrastructure::config::ConfigLoader;
use yatracker::infrastructure::logging::LoggerImpl;
use yatracker::infrastructure::tracker::TrackerClient;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    if let Err(err) = run(cli).await {
        handle_error(err, json_mode);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    let _logger = LoggerImpl::init(&config.logging)?;

    let client = TrackerClient::from_config(&config, cli.conn.as_deref());
    tracing::debug!(conn_id = client.conn_id(), "tracker client ready");

    commands::issue::execute(cli.command, &client, cli.json).await
}
