//! Core type definitions with validation.

use std::fmt;

use thiserror::Error;

/// Validation errors for user-supplied input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The year was not a usable number.
    #[error("invalid year: {value}")]
    InvalidYear { value: String },

    /// The month was outside 1-12.
    #[error("month must be 1-12, got {value}")]
    MonthOutOfRange { value: String },

    /// The minute counter was not on a quarter hour.
    #[error("minutes must be 0/15/30/45, got {value}")]
    MinutesNotQuarter { value: u32 },
}

/// First-of-month marker an entry is logged against.
///
/// Serialized as `YYYY-MM-01`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Largest year that still fits the four-digit wire form.
    pub const MAX_YEAR: i32 = 9999;

    /// Creates a month key after validation.
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(1..=Self::MAX_YEAR).contains(&year) {
            return Err(ValidationError::InvalidYear {
                value: year.to_string(),
            });
        }
        if !(1..=12).contains(&month) {
            return Err(ValidationError::MonthOutOfRange {
                value: month.to_string(),
            });
        }
        Ok(Self { year, month })
    }

    /// Leniently reads the year and month out of a stored date string.
    ///
    /// Only the leading digits of the first two `-` separated parts are used,
    /// so `2024-09-01`, `2024-9` and `2024-09-15T00:00` all resolve. Returns
    /// `None` for anything that does not yield a valid key.
    pub fn parse_lenient(date: &str) -> Option<Self> {
        let mut parts = date.split('-');
        let year = leading_number(parts.next()?)?;
        let month = leading_number(parts.next()?)?;
        Self::new(i32::try_from(year).ok()?, u32::try_from(month).ok()?).ok()
    }

    pub const fn year(self) -> i32 {
        self.year
    }

    pub const fn month(self) -> u32 {
        self.month
    }
}

fn leading_number(part: &str) -> Option<u64> {
    let part = part.trim_start();
    let end = part
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(part.len());
    part[..end].parse().ok()
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-01", self.year, self.month)
    }
}

/// Rounds an hour value to two decimal places.
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}
