//! Persistence of the dataset to a single key-value slot.
//!
//! The store owns the live [`Dataset`]. Every mutation rewrites the whole
//! document to the slot; there are no partial writes.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::category::Category;
use crate::dataset::{DataError, Dataset, Entry, LdcEntry};

/// Fixed key of the persistence slot.
pub const STORAGE_KEY: &str = "predigtdienst_data_v1";

/// Default file name for exported datasets.
pub const EXPORT_FILE_NAME: &str = "predigtdienst_data.json";

/// Errors raised while persisting the dataset.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The dataset could not be encoded as JSON.
    #[error("failed to encode dataset: {0}")]
    Encode(#[from] serde_json::Error),

    /// The slot rejected the write.
    #[error("failed to write {slot}: {source}")]
    Write {
        slot: String,
        #[source]
        source: io::Error,
    },
}

/// Errors raised by [`EntryStore::import_json`].
#[derive(Debug, Error)]
pub enum ImportError {
    /// The import document could not be read as a dataset.
    #[error("import failed: {0}")]
    Corrupt(#[from] DataError),

    /// The imported dataset could not be persisted.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A single key-value slot holding the serialized dataset.
pub trait Slot {
    /// Human-readable location, used in messages.
    fn describe(&self) -> String;

    /// Returns the stored value, or `None` if nothing has been stored yet.
    fn read(&self) -> io::Result<Option<String>>;

    /// Replaces the stored value.
    fn write(&mut self, value: &str) -> io::Result<()>;
}

/// Slot backed by a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Slot for FileSlot {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, value: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, value)
    }
}

/// In-memory slot that counts writes.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    value: Option<String>,
    writes: usize,
}

impl MemorySlot {
    /// Creates a slot already holding `value`.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            writes: 0,
        }
    }

    /// Number of writes since construction.
    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl Slot for MemorySlot {
    fn describe(&self) -> String {
        format!("memory:{STORAGE_KEY}")
    }

    fn read(&self) -> io::Result<Option<String>> {
        Ok(self.value.clone())
    }

    fn write(&mut self, value: &str) -> io::Result<()> {
        self.value = Some(value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Result of reading the slot.
///
/// Keeps "nothing stored" apart from "stored but unusable", even though both
/// end up as the default dataset.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The slot held a usable document.
    Loaded(Dataset),
    /// The slot was empty.
    Missing,
    /// The slot held a document that could not be read as a dataset.
    Malformed(DataError),
    /// The slot itself could not be read.
    Unreadable(io::Error),
}

impl LoadOutcome {
    /// Returns the loaded dataset, or the default for every failure case.
    pub fn into_dataset(self) -> Dataset {
        match self {
            Self::Loaded(dataset) => dataset,
            Self::Missing | Self::Malformed(_) | Self::Unreadable(_) => Dataset::default(),
        }
    }
}

/// Reads and normalizes the dataset held by `slot`. Never fails.
pub fn load<S: Slot>(slot: &S) -> LoadOutcome {
    match slot.read() {
        Ok(None) => LoadOutcome::Missing,
        Ok(Some(raw)) if raw.trim().is_empty() => LoadOutcome::Missing,
        Ok(Some(raw)) => match Dataset::from_json(&raw) {
            Ok(dataset) => LoadOutcome::Loaded(dataset),
            Err(e) => LoadOutcome::Malformed(e),
        },
        Err(e) => LoadOutcome::Unreadable(e),
    }
}

/// Owner of the live dataset and its persistence slot.
#[derive(Debug)]
pub struct EntryStore<S: Slot> {
    slot: S,
    dataset: Dataset,
}

impl<S: Slot> EntryStore<S> {
    /// Loads the dataset from `slot`, falling back to an empty one.
    pub fn open(slot: S) -> Self {
        let dataset = match load(&slot) {
            LoadOutcome::Loaded(dataset) => {
                tracing::debug!(
                    slot = %slot.describe(),
                    entries = dataset.entries.len(),
                    ldc_entries = dataset.ldc_entries.len(),
                    "loaded dataset"
                );
                dataset
            }
            LoadOutcome::Missing => {
                tracing::debug!(slot = %slot.describe(), "no stored dataset, starting empty");
                Dataset::default()
            }
            LoadOutcome::Malformed(e) => {
                tracing::warn!(slot = %slot.describe(), error = %e, "stored dataset is malformed, starting empty");
                Dataset::default()
            }
            LoadOutcome::Unreadable(e) => {
                tracing::warn!(slot = %slot.describe(), error = %e, "stored dataset is unreadable, starting empty");
                Dataset::default()
            }
        };
        Self { slot, dataset }
    }

    pub const fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub const fn slot(&self) -> &S {
        &self.slot
    }

    /// Writes the whole dataset to the slot.
    pub fn save(&mut self) -> Result<(), StoreError> {
        let json = self.dataset.to_json_pretty()?;
        self.slot.write(&json).map_err(|source| StoreError::Write {
            slot: self.slot.describe(),
            source,
        })?;
        tracing::info!(slot = %self.slot.describe(), "saved");
        Ok(())
    }

    /// Appends a general entry and saves.
    pub fn append(&mut self, entry: Entry) -> Result<(), StoreError> {
        self.dataset.entries.push(entry);
        self.save()
    }

    /// Appends an LDC entry and saves.
    pub fn append_ldc(&mut self, entry: LdcEntry) -> Result<(), StoreError> {
        self.dataset.ldc_entries.push(entry);
        self.save()
    }

    /// Changes the selected category and saves.
    pub fn select(&mut self, category: Category) -> Result<(), StoreError> {
        self.dataset.selected_category = category;
        self.save()
    }

    /// Replaces the whole dataset and saves.
    pub fn replace(&mut self, dataset: Dataset) -> Result<(), StoreError> {
        self.dataset = dataset;
        self.save()
    }

    /// Imports a document, replacing the dataset.
    ///
    /// The document is normalized exactly like stored data. If it cannot be
    /// read at all the current dataset is left untouched.
    pub fn import_json(&mut self, text: &str) -> Result<(), ImportError> {
        let dataset = Dataset::from_json(text)?;
        tracing::debug!(
            entries = dataset.entries.len(),
            ldc_entries = dataset.ldc_entries.len(),
            "importing dataset"
        );
        self.replace(dataset)?;
        Ok(())
    }

    /// Serializes the current dataset in its export form.
    pub fn export_json(&self) -> Result<String, StoreError> {
        Ok(self.dataset.to_json_pretty()?)
    }
}
