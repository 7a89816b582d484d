//! Select command for choosing the category general hours are logged against.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use hours_core::Category;

use crate::Config;
use crate::commands::util::open_store;

#[derive(Debug, Args)]
pub struct SelectArgs {
    /// Category identifier, label or slug (see `hours categories`).
    pub category: Category,
}

pub fn run<W: Write>(writer: &mut W, args: &SelectArgs, config: &Config) -> Result<()> {
    let mut store = open_store(config);
    store.select(args.category)?;
    writeln!(writer, "Selected {}.", args.category.label())?;
    Ok(())
}
