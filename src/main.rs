use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use armorywatch::{Output, Poller, PollerConfig};
use armorywatch_client::ArmoryClient;

#[derive(Parser, Debug)]
#[command(name = "armorywatch")]
#[command(about = "Polls the Battle.net armory and publishes per-character metric snapshots")]
#[command(version)]
struct Args {
    /// Path to the config file (TOML or YAML)
    #[arg(short, long, default_value = "armorywatch.toml")]
    config: PathBuf,

    /// Write each snapshot to this JSON file (overwritten per cycle)
    #[arg(short, long, conflicts_with = "once")]
    output: Option<PathBuf>,

    /// Run a single poll cycle, print the snapshot as JSON, and exit
    #[arg(long)]
    once: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("armorywatch={log_level},armorywatch_client={log_level}"))
        .init();

    let config = PollerConfig::load(&args.config)?;
    info!(
        region = %config.region,
        characters = config.characters.len(),
        interval_secs = config.poll_interval_secs,
        "starting armorywatch"
    );

    let client = ArmoryClient::builder()
        .region(config.region)
        .credentials(config.client_id.clone(), config.client_secret.clone())
        .build();

    client
        .validate_connection()
        .await
        .context("cannot connect to the armory API - check client id/secret and region")?;
    info!("connection validated");

    let mut poller = Poller::new(client, &config);
    if let Some(path) = &args.output {
        poller = poller.output(Output::file(path));
    }

    if args.once {
        let snapshot = poller.run_cycle().await?;
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let handle = poller.start();

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    handle.stop();

    Ok(())
}
