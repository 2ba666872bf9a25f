//! Hostmix binary
//!
//! Runs a guest against command-line inputs and prints a JSON report.

use anyhow::Result;
use clap::Parser;
use hostmix_cli::Opts;
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();

    match opts.run().await {
        Ok(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Err(e) => {
            error!("hostmix failed: {:#}", e);
            std::process::exit(1);
        }
    }
}
