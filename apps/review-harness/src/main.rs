//! Review harness binary
//!
//! Runs a design-review session over stdin/stdout.

use clap::Parser;
use review_harness::{transport::stdio::run_stdio, Args};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // stdout carries protocol messages, so logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting review harness v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Document: {}", args.document.display());
    tracing::info!("Store: {}", args.store.display());

    run_stdio(&args)?;
    Ok(())
}
