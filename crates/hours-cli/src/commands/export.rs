//! Export command for writing the dataset to a JSON file.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use hours_core::EXPORT_FILE_NAME;

use crate::Config;
use crate::commands::util::open_store;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Destination file, or `-` for stdout.
    #[arg(short, long, default_value = EXPORT_FILE_NAME)]
    pub output: PathBuf,
}

pub fn run<W: Write>(writer: &mut W, args: &ExportArgs, config: &Config) -> Result<()> {
    let store = open_store(config);
    let json = store.export_json()?;

    if args.output.as_os_str() == "-" {
        writeln!(writer, "{json}")?;
        return Ok(());
    }

    std::fs::write(&args.output, &json)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    tracing::debug!(path = %args.output.display(), "export written");
    writeln!(writer, "Exported to {}.", args.output.display())?;
    Ok(())
}
