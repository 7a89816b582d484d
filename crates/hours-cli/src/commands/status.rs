//! Status command for showing where data lives and whether it loaded cleanly.

use std::io::Write;

use anyhow::Result;

use hours_core::{FileSlot, LoadOutcome, store};

use crate::Config;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let slot = FileSlot::new(&config.data_path);

    writeln!(writer, "Service hours status")?;
    writeln!(writer, "Data file: {}", config.data_path.display())?;

    let outcome = store::load(&slot);
    match &outcome {
        LoadOutcome::Loaded(_) => writeln!(writer, "Stored data: ok")?,
        LoadOutcome::Missing => writeln!(writer, "Stored data: none yet")?,
        LoadOutcome::Malformed(e) => {
            writeln!(writer, "Stored data: malformed ({e}), using empty dataset")?;
        }
        LoadOutcome::Unreadable(e) => {
            writeln!(writer, "Stored data: unreadable ({e}), using empty dataset")?;
        }
    }

    let dataset = outcome.into_dataset();
    writeln!(writer, "Entries: {}", dataset.entries.len())?;
    writeln!(writer, "LDC entries: {}", dataset.ldc_entries.len())?;
    writeln!(
        writer,
        "Selected category: {}",
        dataset.selected_category.label()
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    fn render(config: &Config) -> String {
        let mut output = Vec::new();
        run(&mut output, config).unwrap();
        let output = String::from_utf8(output).unwrap();
        output.replace(&config.data_path.display().to_string(), "[TEMP]/data.json")
    }

    #[test]
    fn status_without_data() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config {
            data_path: temp.path().join("data.json"),
        };

        assert_snapshot!(render(&config), @r"
        Service hours status
        Data file: [TEMP]/data.json
        Stored data: none yet
        Entries: 0
        LDC entries: 0
        Selected category: Chin. H2H
        ");
    }

    #[test]
    fn status_reports_malformed_data() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config {
            data_path: temp.path().join("data.json"),
        };
        std::fs::write(&config.data_path, "[\"not\", \"an object\"]").unwrap();

        assert_snapshot!(render(&config), @r"
        Service hours status
        Data file: [TEMP]/data.json
        Stored data: malformed (expected an object at the top level, found array), using empty dataset
        Entries: 0
        LDC entries: 0
        Selected category: Chin. H2H
        ");
    }

    #[test]
    fn status_counts_stored_entries() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config {
            data_path: temp.path().join("data.json"),
        };
        std::fs::write(
            &config.data_path,
            r#"{"entries": [{"date": "2024-09-01", "service_type": "Trolley", "hours": 1}], "selected_service": "Trolley"}"#,
        )
        .unwrap();

        let output = render(&config);
        assert!(output.contains("Stored data: ok\nEntries: 1\nLDC entries: 0\nSelected category: Trolley\n"));
    }
}
