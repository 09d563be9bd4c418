use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::Deserialize;

/// Backing file used when neither --file nor the config file names one.
pub(crate) const DEFAULT_DATA_FILE: &str = "transactions.csv";

/// Optional user configuration, read from a toml file.
#[derive(Deserialize, Debug, Default)]
pub(crate) struct Config {
    /// Ledger csv file used when --file is not given.
    pub(crate) data_file: Option<PathBuf>,
}

impl Config {
    pub(crate) fn empty() -> Config {
        Config::default()
    }

    /// Standard location: <config dir>/vitecompta/config.toml
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vitecompta").join("config.toml"))
    }

    pub(crate) fn load_default() -> Config {
        match Config::default_path() {
            Some(path) => Config::load_from_file(&path),
            None => Config::empty(),
        }
    }

    /// A missing config file is not an error, the tool runs on defaults.
    /// A malformed one is ignored with a warning rather than aborting.
    pub(crate) fn load_from_file(path: &Path) -> Config {
        if !(path.exists() && path.is_file()) {
            return Config::empty();
        }

        match fs::read_to_string(path) {
            Ok(raw) => toml::from_str::<Config>(&raw).unwrap_or_else(|e| {
                warn!("Ignoring malformed config {}: {}", path.display(), e);
                Config::empty()
            }),
            Err(e) => {
                warn!("Ignoring unreadable config {}: {}", path.display(), e);
                Config::empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_from_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let config = Config::load_from_file(&dir.path().join("absent.toml"));
        assert!(config.data_file.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "data_file = \"/tmp/compta/transactions.csv\"\n").unwrap();

        let config = Config::load_from_file(&path);
        assert_eq!(config.data_file, Some(PathBuf::from("/tmp/compta/transactions.csv")));
    }

    #[test]
    fn test_malformed_config_is_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "data_file = [not toml").unwrap();

        let config = Config::load_from_file(&path);
        assert!(config.data_file.is_none());
    }
}
