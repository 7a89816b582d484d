//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use hours_core::STORAGE_KEY;
use serde::{Deserialize, Serialize};

/// Application configuration.
///
/// Sources, later ones winning:
///
/// 1. built-in defaults
/// 2. `config.toml` in the platform config directory (`~/.config/hours` on Linux)
/// 3. the file given with `--config`
/// 4. `HOURS_`-prefixed environment variables
///
/// Keys:
///
/// - `data_path` (`HOURS_DATA_PATH`): file holding the dataset. Defaults to
///   `predigtdienst_data_v1.json` in the platform data directory, the same
///   name the storage slot has always used so existing data stays readable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            data_path: data_dir.join(format!("{STORAGE_KEY}.json")),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        sources(config_path).extract()
    }
}

fn sources(config_path: Option<&Path>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));
    if let Some(config_dir) = dirs_config_path() {
        figment = figment.merge(Toml::file(config_dir.join("config.toml")));
    }
    if let Some(path) = config_path {
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(Env::prefixed("HOURS_"))
}

/// Returns the platform-specific config directory.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("hours"))
}

/// Returns the platform-specific data directory.
///
/// On Linux: `~/.local/share/hours`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("hours"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_data_path_ends_with_hours() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "hours");
    }

    #[test]
    fn test_default_config_uses_storage_key_file() {
        let config = Config::default();
        assert_eq!(
            config.data_path,
            dirs_data_path().unwrap().join("predigtdienst_data_v1.json")
        );
    }

    #[test]
    fn test_explicit_config_file_overrides_default() {
        let temp = tempfile::tempdir().unwrap();
        let config_path = temp.path().join("custom.toml");
        std::fs::write(&config_path, "data_path = \"/srv/hours/data.json\"\n").unwrap();

        let config = Config::load_from(Some(&config_path)).unwrap();
        assert_eq!(config.data_path, PathBuf::from("/srv/hours/data.json"));
    }

    #[test]
    fn test_mistyped_data_path_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let config_path = temp.path().join("custom.toml");
        std::fs::write(&config_path, "data_path = 5\n").unwrap();

        let err = Config::load_from(Some(&config_path)).unwrap_err();
        assert!(err.to_string().contains("data_path"), "{err}");
    }
}
