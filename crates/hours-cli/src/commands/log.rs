//! Log command for committing general or LDC hours for a month.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;

use hours_core::{Bucket, Category, SessionInput, TimeCounter};

use crate::Config;
use crate::commands::util::{MonthArgs, open_store};

#[derive(Debug, Args)]
pub struct LogArgs {
    /// Log LDC hours instead of general service hours.
    #[arg(long)]
    pub ldc: bool,

    /// Whole hours to add.
    #[arg(long, default_value_t = 0)]
    pub hours: u32,

    /// Quarter hours (15 minutes each) to add.
    #[arg(short, long, default_value_t = 0)]
    pub quarters: u32,

    /// Category for general hours; also becomes the selected category.
    #[arg(long, conflicts_with = "ldc")]
    pub category: Option<Category>,

    #[command(flatten)]
    pub month: MonthArgs,
}

pub fn run<W: Write>(
    writer: &mut W,
    args: &LogArgs,
    config: &Config,
    today: NaiveDate,
) -> Result<()> {
    let bucket = if args.ldc { Bucket::Ldc } else { Bucket::General };
    let mut input = SessionInput::new();
    input.set(bucket, TimeCounter::new(args.hours, 0));
    for _ in 0..args.quarters {
        input.add_quarter_hour(bucket);
    }
    let pending = input.counter(bucket);

    let (year, month) = args.month.resolve(today);
    // The selection is persisted only once the input is known to be valid.
    input.validate(bucket, year, month)?;

    let mut store = open_store(config);
    if let Some(category) = args.category.filter(|c| *c != store.dataset().selected_category) {
        store.select(category)?;
    }

    let Some(committed) = input.commit(bucket, year, month, &mut store)? else {
        writeln!(writer, "Nothing to save ({pending}).")?;
        return Ok(());
    };

    let target = committed.category.map_or("LDC", Category::label);
    writeln!(
        writer,
        "Saved {:.2} h ({pending}) to {target} for {}.",
        committed.hours, committed.month
    )?;
    Ok(())
}
