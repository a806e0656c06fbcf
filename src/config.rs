//! Reader configuration
//!
//! Read from `<config_dir>/hanzi-reader/config.toml`. Every field is
//! optional; anything left out falls back to a path under the local data
//! directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR: &str = "hanzi-reader";
const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Could not write config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Config directory not found")]
    ConfigDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct ReaderConfig {
    /// Directory holding the databases and the CEDICT source
    pub data_dir: PathBuf,
    /// CC-CEDICT source, read when the dictionary index is built
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cedict_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dictionary_db: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words_db: Option<PathBuf>,
    /// Words per review session
    pub review_limit: usize,
    /// Default log filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            cedict_path: None,
            dictionary_db: None,
            words_db: None,
            review_limit: 10,
            log_level: "warn".to_string(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("data"))
}

impl ReaderConfig {
    /// Default location of the config file
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR).join(CONFIG_FILE))
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    /// Load from `path`, or the default location. A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };

        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn cedict_path(&self) -> PathBuf {
        self.cedict_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join("cedict.txt"))
    }

    pub fn dictionary_db(&self) -> PathBuf {
        self.dictionary_db
            .clone()
            .unwrap_or_else(|| self.data_dir.join("dictionary.db"))
    }

    pub fn words_db(&self) -> PathBuf {
        self.words_db
            .clone()
            .unwrap_or_else(|| self.data_dir.join("saved_words.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = ReaderConfig::load(Some(&temp.path().join("config.toml"))).unwrap();
        assert_eq!(config, ReaderConfig::default());
        assert_eq!(config.review_limit, 10);
    }

    #[test]
    fn test_derived_paths() {
        let config = ReaderConfig {
            data_dir: PathBuf::from("/srv/reader"),
            ..Default::default()
        };
        assert_eq!(config.cedict_path(), PathBuf::from("/srv/reader/cedict.txt"));
        assert_eq!(config.dictionary_db(), PathBuf::from("/srv/reader/dictionary.db"));
        assert_eq!(config.words_db(), PathBuf::from("/srv/reader/saved_words.db"));
    }

    #[test]
    fn test_partial_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "data_dir = \"/tmp/hz\"\ncedict_path = \"/opt/cedict_ts.u8\"\nreview_limit = 25\n",
        )
        .unwrap();

        let config = ReaderConfig::load(Some(&path)).unwrap();
        assert_eq!(config.review_limit, 25);
        assert_eq!(config.cedict_path(), PathBuf::from("/opt/cedict_ts.u8"));
        assert_eq!(config.words_db(), PathBuf::from("/tmp/hz/saved_words.db"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_save_and_reload() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");
        let config = ReaderConfig {
            data_dir: temp.path().to_path_buf(),
            review_limit: 5,
            log_level: "debug".to_string(),
            ..Default::default()
        };
        config.save(&path).unwrap();

        assert_eq!(ReaderConfig::load(Some(&path)).unwrap(), config);
    }

    #[test]
    fn test_invalid_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "review_limit = \"many\"").unwrap();
        assert!(matches!(
            ReaderConfig::load(Some(&path)),
            Err(ConfigError::Toml(_))
        ));
    }
}
