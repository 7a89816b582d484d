//! Import command for replacing the dataset with an exported JSON file.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::Config;
use crate::commands::util::open_store;

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// JSON file previously written by `hours export`.
    pub path: PathBuf,
}

/// Replaces the stored dataset with the file's contents.
///
/// A file that cannot be read as a dataset leaves the stored data unchanged.
pub fn run<W: Write>(writer: &mut W, args: &ImportArgs, config: &Config) -> Result<()> {
    let text = std::fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;

    let mut store = open_store(config);
    store.import_json(&text)?;

    let dataset = store.dataset();
    writeln!(
        writer,
        "Import successful: {} entries, {} LDC entries, selected {}.",
        dataset.entries.len(),
        dataset.ldc_entries.len(),
        dataset.selected_category.label()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use hours_core::{Category, EntryStore, FileSlot, MonthKey, store};

    fn config_in(dir: &std::path::Path) -> Config {
        Config {
            data_path: dir.join("data.json"),
        }
    }

    #[test]
    fn import_replaces_dataset() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_in(temp.path());
        let import_path = temp.path().join("import.json");
        std::fs::write(
            &import_path,
            r#"{
              "entries": [
                {"date": "2024-09-01", "service_type": "Trolley", "hours": 1.0},
                {"date": "2024-09-01", "service_type": "Trolley", "hours": 0.5}
              ],
              "ldc_entries": "broken",
              "selected_service": "Fernfahrer"
            }"#,
        )
        .unwrap();

        let mut output = Vec::new();
        run(
            &mut output,
            &ImportArgs {
                path: import_path.clone(),
            },
            &config,
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Import successful: 2 entries, 0 LDC entries, selected Fernfahrer.\n"
        );

        let dataset = store::load(&FileSlot::new(&config.data_path)).into_dataset();
        assert_eq!(dataset.entries.len(), 2);
        assert!(dataset.ldc_entries.is_empty());
        assert_eq!(dataset.selected_category, Category::Truckers);
    }

    #[test]
    fn corrupt_import_keeps_existing_data() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_in(temp.path());
        let mut existing = EntryStore::open(FileSlot::new(&config.data_path));
        existing
            .append_ldc(hours_core::LdcEntry::new(
                MonthKey::new(2024, 5).unwrap(),
                2.0,
            ))
            .unwrap();
        let before = std::fs::read_to_string(&config.data_path).unwrap();

        let import_path = temp.path().join("import.json");
        std::fs::write(&import_path, "{\"entries\": [").unwrap();

        let mut output = Vec::new();
        let err = run(&mut output, &ImportArgs { path: import_path }, &config).unwrap_err();
        assert!(err.to_string().starts_with("import failed: document is not valid JSON"));
        assert!(output.is_empty());
        assert_eq!(std::fs::read_to_string(&config.data_path).unwrap(), before);
    }

    #[test]
    fn missing_import_file_is_reported() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_in(temp.path());
        let path = temp.path().join("nope.json");

        let mut output = Vec::new();
        let err = run(&mut output, &ImportArgs { path: path.clone() }, &config).unwrap_err();
        assert_eq!(err.to_string(), format!("failed to read {}", path.display()));
    }
}
