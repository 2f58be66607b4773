//! Persisted CLI configuration.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// On-disk settings. Every entry can be overridden per invocation with the
/// matching global flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default spreadsheet locator, URL or title.
    pub sheet: Option<String>,
    /// Authorized-user credentials file.
    #[serde(default = "default_credentials_path")]
    pub credentials: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet: None,
            credentials: default_credentials_path(),
        }
    }
}

fn default_credentials_path() -> PathBuf {
    config_dir().join("credentials.json")
}

/// Platform config directory for this tool (~/.config/presenca on Linux).
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("presenca")
}

pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

impl Config {
    /// Load from disk, or defaults when no file exists yet.
    pub fn load() -> Result<Self> {
        let path = config_file();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        let dir = config_dir();
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        let path = config_file();
        let content = toml::to_string_pretty(self).context("failed to serialize config")?;
        fs::write(&path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_toml() {
        let config = Config {
            sheet: Some("https://docs.google.com/spreadsheets/d/abc/edit".into()),
            credentials: PathBuf::from("/tmp/credentials.json"),
        };

        let text = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.sheet, config.sheet);
        assert_eq!(parsed.credentials, config.credentials);
    }

    #[test]
    fn missing_entries_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert!(parsed.sheet.is_none());
        assert_eq!(parsed.credentials, default_credentials_path());
    }
}
