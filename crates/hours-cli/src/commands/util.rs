//! Shared utilities for CLI commands.

use chrono::{Datelike, NaiveDate};
use clap::Args;

use hours_core::{EntryStore, FileSlot};

use crate::Config;

/// Target month, defaulting to the current one.
#[derive(Debug, Clone, Copy, Args)]
pub struct MonthArgs {
    /// Year (defaults to the current year).
    #[arg(long)]
    pub year: Option<i32>,

    /// Month 1-12 (defaults to the current month).
    #[arg(long)]
    pub month: Option<u32>,
}

impl MonthArgs {
    /// Fills missing parts from `today`. The result is not validated.
    pub fn resolve(self, today: NaiveDate) -> (i32, u32) {
        (
            self.year.unwrap_or_else(|| today.year()),
            self.month.unwrap_or_else(|| today.month()),
        )
    }
}

/// Opens the dataset stored at the configured path.
pub fn open_store(config: &Config) -> EntryStore<FileSlot> {
    EntryStore::open(FileSlot::new(&config.data_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_defaults_to_today() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let args = MonthArgs {
            year: None,
            month: None,
        };
        assert_eq!(args.resolve(today), (2025, 3));
    }

    #[test]
    fn resolve_keeps_explicit_parts() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let args = MonthArgs {
            year: Some(2023),
            month: None,
        };
        assert_eq!(args.resolve(today), (2023, 3));
        let args = MonthArgs {
            year: None,
            month: Some(13),
        };
        assert_eq!(args.resolve(today), (2025, 13));
    }
}
