//! auction-melt: Flatten auction listing JSON into load files
//!
//! Usage:
//!   # Melt every listing file, appending to ./itemTable.dat etc.
//!   auction-melt items-*.json
//!
//!   # Melt a directory of exports into ./load, tab-separated
//!   auction-melt ebay_data/ --output-dir ./load --separator $'\t'
//!
//!   # Reject malformed prices/dates, but keep going past bad items
//!   auction-melt --strict --skip-invalid items-*.json

// Use MiMalloc allocator for better performance (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::Result;
use auction_melt::cli::{run, Args};
use clap::Parser;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let stdout = std::io::stdout();
    run(&args, &mut stdout.lock())
}
