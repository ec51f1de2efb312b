use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::catalog::SortKey;
use crate::error::ConfigError;

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Quote dataset, CSV or JSON.
    pub data_path: PathBuf,
    /// JSON array of liked quote ids.
    pub likes_path: PathBuf,
    pub default_sort: SortKey,
    /// Cards shown before "Show more".
    pub page_size: usize,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/quotes.json"),
            likes_path: PathBuf::from("data/liked_quotes.json"),
            default_sort: SortKey::Recency,
            page_size: 60,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml_str(contents: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid { key: "page_size", reason: "must be at least 1".to_string() });
        }
        if self.data_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid { key: "data_path", reason: "must not be empty".to_string() });
        }
        Ok(())
    }
}

/// Reads `file_path`. With `required == false` a missing file means defaults.
pub fn load_config_from_file(file_path: &Path, required: bool) -> Result<Config, ConfigError> {
    match fs::read_to_string(file_path) {
        Ok(contents) => Config::from_toml_str(&contents, file_path),
        Err(e) if e.kind() == ErrorKind::NotFound && !required => Ok(Config::default()),
        Err(source) => Err(ConfigError::Read { path: file_path.to_path_buf(), source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::from_toml_str("page_size = 24\ndefault_sort = \"speaker\"\n", Path::new("c.toml")).unwrap();
        assert_eq!(config.page_size, 24);
        assert_eq!(config.default_sort, SortKey::Speaker);
        assert_eq!(config.data_path, Config::default().data_path);
    }

    #[test]
    fn unknown_keys_and_bad_values_are_rejected() {
        assert!(matches!(
            Config::from_toml_str("content_project_dir = \"x\"", Path::new("c.toml")),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            Config::from_toml_str("page_size = 0", Path::new("c.toml")),
            Err(ConfigError::Invalid { key: "page_size", .. })
        ));
    }

    #[test]
    fn missing_optional_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert_eq!(load_config_from_file(&path, false).unwrap(), Config::default());
        assert!(matches!(load_config_from_file(&path, true), Err(ConfigError::Read { .. })));
    }

    #[test]
    fn reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "data_path = \"quotes.csv\"\nlog_level = \"debug\"\n").unwrap();
        let config = load_config_from_file(&path, true).unwrap();
        assert_eq!(config.data_path, PathBuf::from("quotes.csv"));
        assert_eq!(config.log_level, "debug");
    }
}
