//! Categories command for listing the service categories.

use std::io::Write;

use anyhow::Result;

use hours_core::Category;

use crate::Config;
use crate::commands::util::open_store;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let store = open_store(config);
    let selected = store.dataset().selected_category;

    for category in Category::ALL {
        let marker = if category == selected { '*' } else { ' ' };
        writeln!(
            writer,
            "{marker} {:<11} {:<18} {}",
            category.label(),
            category.slug(),
            category.glyph()
        )?;
    }

    Ok(())
}
