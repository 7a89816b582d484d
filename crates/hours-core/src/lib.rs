//! Core domain logic for the service hours tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Categories: the fixed set of service activities
//! - Storage: loading and saving the dataset through a key-value slot
//! - Aggregation: all-time and service-year (September to August) totals
//! - Session input: composing hours before committing them as entries

pub mod aggregate;
pub mod category;
pub mod dataset;
pub mod session;
pub mod store;
mod types;

pub use aggregate::{CategoryTotals, Overview, PeriodTotals, ServiceYear};
pub use category::{Category, UnknownCategory, display_label};
pub use dataset::{DataError, Dataset, Entry, LdcEntry};
pub use session::{Bucket, CommitError, Committed, SessionInput, TimeCounter};
pub use store::{
    EXPORT_FILE_NAME, EntryStore, FileSlot, ImportError, LoadOutcome, MemorySlot, STORAGE_KEY,
    Slot, StoreError,
};
pub use types::{MonthKey, ValidationError, round_hours};
