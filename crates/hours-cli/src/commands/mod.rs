//! CLI subcommand implementations.

pub mod categories;
pub mod entries;
pub mod export;
pub mod import;
pub mod log;
pub mod overview;
pub mod select;
pub mod status;
pub mod util;
