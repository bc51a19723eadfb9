//! Layered configuration: `ecomanager.toml` → environment → CLI flags.
//!
//! # Configuration File Format
//!
//! ```toml
//! [server]
//! port = 8000
//! dev = false
//!
//! [store]
//! seed = true
//! simulate_latency = true
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "ecomanager.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub store: StoreSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub dev: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSection {
    #[serde(default = "default_true")]
    pub seed: bool,
    #[serde(default = "default_true")]
    pub simulate_latency: bool,
}

fn default_port() -> u16 {
    8000
}

fn default_true() -> bool {
    true
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            port: default_port(),
            dev: false,
        }
    }
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            seed: true,
            simulate_latency: true,
        }
    }
}

impl AppConfig {
    /// Load from the given path, or return defaults when the file does not
    /// exist. A present-but-invalid file is an error, not a silent default.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str(&raw)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    /// Environment layer: `ECOMANAGER_PORT` overrides the file.
    fn apply_env(&mut self) {
        if let Ok(port) = std::env::var("ECOMANAGER_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
    }

    /// Write a default config file. Refuses to overwrite an existing one.
    pub fn write_default(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("{} already exists", path.display());
        }
        let rendered =
            toml::to_string_pretty(&Self::default()).context("Failed to render default config")?;
        std::fs::write(path, rendered)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn render(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to render config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.port, 8000);
        assert!(config.store.seed);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "[server]\nport = 9100\n").unwrap();
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.server.port, 9100);
        assert!(!config.server.dev);
        assert!(config.store.simulate_latency);
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "port = \"not a number").unwrap();
        assert!(AppConfig::load(&path).is_err());
    }

    #[test]
    fn write_default_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        AppConfig::write_default(&path).unwrap();
        assert!(path.exists());
        assert!(AppConfig::write_default(&path).is_err());
    }

    #[test]
    fn written_default_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        AppConfig::write_default(&path).unwrap();
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
