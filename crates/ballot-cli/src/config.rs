//! CLI configuration management.
//!
//! Handles the default state file, default caller and log level.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Ballot state file
    pub state_file: PathBuf,
    /// Caller used when `--from` is omitted
    pub default_account: Option<String>,
    /// Log filter (tracing EnvFilter syntax)
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            state_file: base_dir().join("ballot.json"),
            default_account: None,
            log_level: "warn".to_string(),
        }
    }
}

fn base_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".ballot")
}

impl CliConfig {
    /// Load configuration from `path`, writing defaults there if it is missing.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
            let config: CliConfig = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file '{}'", path.display()))?;
        Ok(())
    }

    /// Get configuration file path.
    pub fn config_path() -> anyhow::Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
        Ok(home.join(".ballot").join("config.toml"))
    }

    /// Set a key by name.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "state" | "state_file" => self.state_file = PathBuf::from(value),
            "from" | "default_account" => {
                self.default_account = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            "log_level" => self.log_level = value.to_string(),
            _ => anyhow::bail!("Unknown config key: {}", key),
        }
        Ok(())
    }

    /// Read a key by name.
    pub fn get(&self, key: &str) -> anyhow::Result<String> {
        let value = match key {
            "state" | "state_file" => self.state_file.display().to_string(),
            "from" | "default_account" => self.default_account.clone().unwrap_or_default(),
            "log_level" => self.log_level.clone(),
            _ => anyhow::bail!("Unknown config key: {}", key),
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert!(config.state_file.ends_with("ballot.json"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.default_account, None);
    }

    #[test]
    fn test_set_and_get() {
        let mut config = CliConfig::default();
        config.set("log_level", "debug").unwrap();
        config.set("from", "#3").unwrap();
        assert_eq!(config.get("log_level").unwrap(), "debug");
        assert_eq!(config.get("default_account").unwrap(), "#3");

        config.set("from", "").unwrap();
        assert_eq!(config.default_account, None);

        assert!(config.set("rpc_url", "x").is_err());
        assert!(config.get("gas").is_err());
    }
}
