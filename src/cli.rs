//! Command-line front end behind the `auction-melt` binary

use crate::driver::{collect_inputs, melt_files};
use crate::melt::{AuctionMelter, ErrorPolicy, MeltConfig, Relation, TableWriter, Validation};
use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "auction-melt")]
#[command(about = "Flatten auction listing JSON into delimited load files", long_about = None)]
pub struct Args {
    /// JSON files to melt; directories are searched for *.json files
    #[arg(value_name = "PATH", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory the load files are appended to
    #[arg(long, short = 'o', default_value = ".")]
    pub output_dir: PathBuf,

    /// Column separator (default: "|")
    #[arg(long)]
    pub separator: Option<char>,

    /// Token written for absent or null fields (default: "null")
    #[arg(long)]
    pub null_marker: Option<String>,

    /// Top-level key holding the item list (default: "Items")
    #[arg(long)]
    pub items_key: Option<String>,

    /// Fail on prices and timestamps that are not well-formed
    #[arg(long)]
    pub strict: bool,

    /// Skip items that fail to melt instead of aborting the run
    #[arg(long)]
    pub skip_invalid: bool,
}

impl Args {
    /// Build config: defaults overridden by whatever flags were given
    pub fn config(&self) -> MeltConfig {
        let mut config = MeltConfig::default();
        if let Some(separator) = self.separator {
            config.separator = separator;
        }
        if let Some(null_marker) = &self.null_marker {
            config.null_marker = null_marker.clone();
        }
        if let Some(items_key) = &self.items_key {
            config.items_key = items_key.clone();
        }
        if self.strict {
            config.validation = Validation::Strict;
        }
        if self.skip_invalid {
            config.on_error = ErrorPolicy::Skip;
        }
        config
    }
}

/// Melt every input and append the results to the load files.
///
/// A `Success parsing <path>` line goes to `out` for each melted file. The
/// load files are only opened once every input has melted, so a failing run
/// leaves them untouched.
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let inputs = collect_inputs(&args.inputs).context("Failed to collect input files")?;
    let melter = AuctionMelter::new(args.config());

    let mut notice: std::io::Result<()> = Ok(());
    let tables = melt_files(&inputs, &melter, |path, _stats| {
        if notice.is_ok() {
            notice = writeln!(out, "Success parsing {}", path.display());
        }
    })?;
    notice.context("Failed to report parsed file")?;

    let mut writer = TableWriter::open_dir(&args.output_dir).context(format!(
        "Failed to open output files in {}",
        args.output_dir.display()
    ))?;
    writer.write_tables(&tables)?;
    writer.flush()?;

    for relation in Relation::ALL {
        info!(
            "Appended {} {} rows to {}",
            tables.row_count(relation),
            relation,
            args.output_dir.join(relation.file_name()).display()
        );
    }

    Ok(())
}
