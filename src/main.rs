use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

mod cli;
mod db;
mod domain;
mod errors;
mod popup;
mod scraper;

#[cfg(test)]
mod tests;

fn main() -> Result<()> {
    // 1️⃣ Logging, quiet unless RUST_LOG says otherwise
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    // 2️⃣ Parse arguments
    let cli = Cli::parse();

    // 3️⃣ One activation runs to completion on a single thread
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(cli::execute(cli))
}
