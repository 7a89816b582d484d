//! Overview command for all-time and service-year totals.
//!
//! The service year shown is the one containing the target month: September
//! onwards starts a new service year, January to August belong to the one
//! that started the previous September.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;

use hours_core::{MonthKey, Overview, PeriodTotals, ServiceYear};

use crate::Config;
use crate::commands::util::{MonthArgs, open_store};

#[derive(Debug, Args)]
pub struct OverviewArgs {
    #[command(flatten)]
    pub month: MonthArgs,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run<W: Write>(
    writer: &mut W,
    args: &OverviewArgs,
    config: &Config,
    today: NaiveDate,
) -> Result<()> {
    let (year, month) = args.month.resolve(today);
    let service_year = ServiceYear::containing(MonthKey::new(year, month)?);

    let store = open_store(config);
    let overview = Overview::compute(store.dataset(), service_year);

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&overview)?)?;
    } else {
        write_overview(writer, &overview)?;
    }
    Ok(())
}

fn write_period<W: Write>(writer: &mut W, totals: &PeriodTotals) -> std::io::Result<()> {
    writeln!(writer, "- General: {:.2} h", totals.general)?;
    writeln!(writer, "- LDC: {:.2} h", totals.ldc)?;
    writeln!(writer, "- Total: {:.2} h", totals.total)
}

/// Writes the human-readable overview report.
pub fn write_overview<W: Write>(writer: &mut W, overview: &Overview) -> std::io::Result<()> {
    writeln!(writer, "Overview (all time)")?;
    write_period(writer, &overview.all_time)?;
    writeln!(writer)?;

    writeln!(writer, "Service year {} (Sep-Aug)", overview.service_year)?;
    write_period(writer, &overview.in_service_year)?;
    writeln!(writer)?;

    writeln!(writer, "Hours per category (all time):")?;
    for (category, hours) in overview.by_category.iter() {
        writeln!(writer, "- {}: {hours:.2} h", category.label())?;
    }
    Ok(())
}
