//! # Finality Oracle Node
//!
//! Command line entry point for the finality oracle engine.
//!
//! ## Invocation Cycle
//!
//! 1. Install logging (`RUST_LOG`, default `info`)
//! 2. Load configuration (TOML file, then `FO_*` environment overrides)
//! 3. Restore the engine from the snapshot file (empty engine if none)
//! 4. Run the command through the service API
//! 5. Persist the snapshot if the command changed state
//!
//! ```text
//! oracle-node init
//! oracle-node admit --caller <owner> <oracle> <stake-wei>
//! oracle-node sign --key <hex> --tx-hash <hash> --timestamp <t> --sla-target 12 --confirmations 15
//! oracle-node submit --oracle <addr> --tx-hash <hash> ... --signature <hex>
//! oracle-node proof <hash>
//! ```

mod cli;
mod commands;
mod views;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let mut config = commands::load_config(&cli.config)?;
    if let Some(path) = cli.snapshot {
        config.storage.snapshot_path = path;
    }

    let output = commands::execute(&config, cli.command, cli.json).await?;
    println!("{}", output);
    Ok(())
}
