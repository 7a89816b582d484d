//! Entries command for listing logged rows in storage order.

use std::io::Write;

use anyhow::Result;

use hours_core::display_label;

use crate::Config;
use crate::commands::util::open_store;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let store = open_store(config);
    let dataset = store.dataset();

    if dataset.entries.is_empty() && dataset.ldc_entries.is_empty() {
        writeln!(writer, "No entries recorded.")?;
        return Ok(());
    }

    writeln!(writer, "General ({}):", dataset.entries.len())?;
    for entry in &dataset.entries {
        writeln!(
            writer,
            "  {:<10}  {:<11} {:>7.2} h",
            entry.date,
            display_label(&entry.service_type),
            entry.hours
        )?;
    }

    writeln!(writer, "LDC ({}):", dataset.ldc_entries.len())?;
    for entry in &dataset.ldc_entries {
        writeln!(writer, "  {:<10}  {:<11} {:>7.2} h", entry.date, "LDC", entry.hours)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    #[test]
    fn lists_rows_with_raw_fallback_for_unknown_categories() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config {
            data_path: temp.path().join("data.json"),
        };
        std::fs::write(
            &config.data_path,
            r#"{
              "entries": [
                {"date": "2024-09-01", "service_type": "Hafendienst", "hours": 1.25},
                {"date": "2024-10-01", "service_type": "Gardening", "hours": 2}
              ],
              "ldc_entries": [{"date": "2025-01-01", "hours": 0.5}]
            }"#,
        )
        .unwrap();

        let mut output = Vec::new();
        run(&mut output, &config).unwrap();
        let output = String::from_utf8(output).unwrap();

        assert_snapshot!(output, @r"
        General (2):
          2024-09-01  Hafen          1.25 h
          2024-10-01  Gardening      2.00 h
        LDC (1):
          2025-01-01  LDC            0.50 h
        ");
    }

    #[test]
    fn empty_dataset() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config {
            data_path: temp.path().join("data.json"),
        };

        let mut output = Vec::new();
        run(&mut output, &config).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "No entries recorded.\n");
    }
}
