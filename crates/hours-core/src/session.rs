//! Transient hour/minute input composed before it is committed as an entry.

use std::fmt;

use thiserror::Error;

use crate::category::Category;
use crate::dataset::{Entry, LdcEntry};
use crate::store::{EntryStore, Slot, StoreError};
use crate::types::{MonthKey, ValidationError, round_hours};

/// Minute values a counter may hold when committed.
const QUARTER_MINUTES: [u32; 4] = [0, 15, 30, 45];

/// Which bucket an input counter feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// General service hours, tagged with the selected category.
    General,
    /// LDC hours, untagged.
    Ldc,
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::General => write!(f, "general"),
            Self::Ldc => write!(f, "LDC"),
        }
    }
}

/// Whole hours plus minutes being composed for one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeCounter {
    pub hours: u32,
    pub minutes: u32,
}

impl TimeCounter {
    pub const fn new(hours: u32, minutes: u32) -> Self {
        Self { hours, minutes }
    }

    /// Decimal hours rounded to two places.
    pub fn decimal_hours(self) -> f64 {
        round_hours(f64::from(self.hours) + f64::from(self.minutes) / 60.0)
    }
}

impl fmt::Display for TimeCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} h {} m", self.hours, self.minutes)
    }
}

/// Errors raised by [`SessionInput::commit`].
#[derive(Debug, Error)]
pub enum CommitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A committed entry, as appended to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Committed {
    pub bucket: Bucket,
    pub month: MonthKey,
    pub category: Option<Category>,
    pub hours: f64,
}

/// Input counters for the general and LDC buckets. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionInput {
    general: TimeCounter,
    ldc: TimeCounter,
}

impl SessionInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn counter(&self, bucket: Bucket) -> TimeCounter {
        match bucket {
            Bucket::General => self.general,
            Bucket::Ldc => self.ldc,
        }
    }

    /// Overwrites a counter as-is. Minutes are only checked on commit.
    pub fn set(&mut self, bucket: Bucket, counter: TimeCounter) {
        *self.counter_mut(bucket) = counter;
    }

    pub fn add_hour(&mut self, bucket: Bucket) {
        let counter = self.counter_mut(bucket);
        counter.hours = counter.hours.saturating_add(1);
    }

    /// Adds 15 minutes, carrying full hours into the hour counter.
    pub fn add_quarter_hour(&mut self, bucket: Bucket) {
        let counter = self.counter_mut(bucket);
        counter.minutes += 15;
        if counter.minutes >= 60 {
            counter.hours = counter.hours.saturating_add(counter.minutes / 60);
            counter.minutes %= 60;
        }
    }

    pub fn reset(&mut self, bucket: Bucket) {
        *self.counter_mut(bucket) = TimeCounter::new(0, 0);
    }

    /// Checks the target month and the bucket's minutes without committing.
    pub fn validate(
        &self,
        bucket: Bucket,
        year: i32,
        month: u32,
    ) -> Result<MonthKey, ValidationError> {
        let month = MonthKey::new(year, month)?;
        let minutes = self.counter(bucket).minutes;
        if !QUARTER_MINUTES.contains(&minutes) {
            return Err(ValidationError::MinutesNotQuarter { value: minutes });
        }
        Ok(month)
    }

    /// Commits a bucket's counter as a new entry for `year`-`month`.
    ///
    /// Validation happens before anything is touched. A zero total is a
    /// no-op and returns `Ok(None)` without writing. On success the entry is
    /// appended and saved, and the bucket is reset.
    pub fn commit<S: Slot>(
        &mut self,
        bucket: Bucket,
        year: i32,
        month: u32,
        store: &mut EntryStore<S>,
    ) -> Result<Option<Committed>, CommitError> {
        let month = self.validate(bucket, year, month)?;
        let counter = self.counter(bucket);
        let hours = counter.decimal_hours();
        if hours <= 0.0 {
            tracing::debug!(%bucket, "nothing to commit");
            return Ok(None);
        }

        let category = match bucket {
            Bucket::General => {
                let category = store.dataset().selected_category;
                store.append(Entry::new(month, category, hours))?;
                Some(category)
            }
            Bucket::Ldc => {
                store.append_ldc(LdcEntry::new(month, hours))?;
                None
            }
        };
        self.reset(bucket);
        tracing::info!(%bucket, %month, hours, "entry saved");

        Ok(Some(Committed {
            bucket,
            month,
            category,
            hours,
        }))
    }

    fn counter_mut(&mut self, bucket: Bucket) -> &mut TimeCounter {
        match bucket {
            Bucket::General => &mut self.general,
            Bucket::Ldc => &mut self.ldc,
        }
    }
}

#[cfg(test)]
#[expect(
    clippy::float_cmp,
    reason = "quarter hours are exact in binary floating point"
)]
mod tests {
    use super::*;

    use crate::aggregate::{totals_by_category, totals_by_category_in_service_year};
    use crate::store::MemorySlot;

    fn empty_store() -> EntryStore<MemorySlot> {
        EntryStore::open(MemorySlot::default())
    }

    #[test]
    fn quarter_hours_carry_into_hours() {
        let mut input = SessionInput::new();
        for _ in 0..5 {
            input.add_quarter_hour(Bucket::General);
        }
        assert_eq!(input.counter(Bucket::General), TimeCounter::new(1, 15));
        assert_eq!(input.counter(Bucket::Ldc), TimeCounter::default());
    }

    #[test]
    fn counters_saturate_instead_of_overflowing() {
        let mut input = SessionInput::new();
        input.set(Bucket::General, TimeCounter::new(u32::MAX, 45));
        input.add_hour(Bucket::General);
        input.add_quarter_hour(Bucket::General);
        assert_eq!(input.counter(Bucket::General), TimeCounter::new(u32::MAX, 0));
    }

    #[test]
    fn validate_checks_month_and_minutes() {
        let mut input = SessionInput::new();
        assert_eq!(
            input.validate(Bucket::General, 2024, 9),
            Ok(MonthKey::new(2024, 9).unwrap())
        );
        assert!(matches!(
            input.validate(Bucket::General, 2024, 0),
            Err(ValidationError::MonthOutOfRange { .. })
        ));
        input.set(Bucket::Ldc, TimeCounter::new(1, 20));
        assert_eq!(
            input.validate(Bucket::Ldc, 2024, 9),
            Err(ValidationError::MinutesNotQuarter { value: 20 })
        );
    }

    #[test]
    fn buckets_are_independent() {
        let mut input = SessionInput::new();
        input.add_hour(Bucket::Ldc);
        input.add_hour(Bucket::Ldc);
        input.add_quarter_hour(Bucket::General);
        input.reset(Bucket::General);

        assert_eq!(input.counter(Bucket::General), TimeCounter::default());
        assert_eq!(input.counter(Bucket::Ldc), TimeCounter::new(2, 0));
    }

    #[test]
    fn counter_display() {
        assert_eq!(TimeCounter::new(2, 45).to_string(), "2 h 45 m");
    }

    #[test]
    fn commit_general_tags_selected_category() {
        let mut store = empty_store();
        store.select(Category::Trolley).unwrap();

        let mut input = SessionInput::new();
        input.add_hour(Bucket::General);
        input.add_quarter_hour(Bucket::General);

        let committed = input
            .commit(Bucket::General, 2024, 9, &mut store)
            .unwrap()
            .unwrap();
        assert_eq!(committed.hours, 1.25);
        assert_eq!(committed.category, Some(Category::Trolley));

        let entries = &store.dataset().entries;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, "2024-09-01");
        assert_eq!(entries[0].service_type, "Trolley");
        assert_eq!(entries[0].hours, 1.25);

        assert_eq!(totals_by_category(store.dataset()).get(Category::Trolley), 1.25);
        assert_eq!(
            totals_by_category_in_service_year(store.dataset(), 2024).get(Category::Trolley),
            1.25
        );
        assert_eq!(input.counter(Bucket::General), TimeCounter::default());
    }

    #[test]
    fn commit_ldc_appends_untagged_entry() {
        let mut store = empty_store();
        let mut input = SessionInput::new();
        input.add_quarter_hour(Bucket::Ldc);
        input.add_quarter_hour(Bucket::Ldc);

        let committed = input.commit(Bucket::Ldc, 2025, 1, &mut store).unwrap().unwrap();
        assert_eq!(committed.category, None);
        assert!(store.dataset().entries.is_empty());
        assert_eq!(store.dataset().ldc_entries.len(), 1);
        assert_eq!(store.dataset().ldc_entries[0].date, "2025-01-01");
        assert_eq!(store.dataset().ldc_entries[0].hours, 0.5);
    }

    #[test]
    fn zero_commit_is_a_silent_noop() {
        let mut store = empty_store();
        let mut input = SessionInput::new();

        let result = input.commit(Bucket::General, 2024, 9, &mut store).unwrap();
        assert!(result.is_none());
        assert!(store.dataset().entries.is_empty());
        assert_eq!(store.slot().writes(), 0);
    }

    #[test]
    fn off_quarter_minutes_are_rejected() {
        let mut store = empty_store();
        let mut input = SessionInput::new();
        input.set(Bucket::General, TimeCounter::new(1, 20));

        let err = input
            .commit(Bucket::General, 2024, 9, &mut store)
            .unwrap_err();
        assert!(matches!(
            err,
            CommitError::Invalid(ValidationError::MinutesNotQuarter { value: 20 })
        ));
        assert!(store.dataset().entries.is_empty());
        assert_eq!(store.slot().writes(), 0);
        assert_eq!(input.counter(Bucket::General), TimeCounter::new(1, 20));
    }

    #[test]
    fn invalid_month_is_rejected_before_mutation() {
        let mut store = empty_store();
        let mut input = SessionInput::new();
        input.add_hour(Bucket::Ldc);

        for (year, month) in [(2024, 0), (2024, 13), (0, 5)] {
            let err = input.commit(Bucket::Ldc, year, month, &mut store).unwrap_err();
            assert!(matches!(err, CommitError::Invalid(_)), "{year}-{month}");
        }
        assert!(store.dataset().ldc_entries.is_empty());
        assert_eq!(store.slot().writes(), 0);
        assert_eq!(input.counter(Bucket::Ldc), TimeCounter::new(1, 0));
    }
}
