use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::report::ReportPeriod;

/// Main configuration structure
///
/// Only supplies defaults to callers; the engine itself takes every
/// parameter explicitly. Priority: CLI > File > Defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub expiry: ExpiryConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

impl Config {
    /// Load config from the default location, falling back to defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            // No config file? Use defaults
            Ok(Self::default())
        }
    }

    /// Load and validate config from an explicit path
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn validate(&self) -> crate::Result<()> {
        let pct = self.matching.min_match_percentage;
        if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
            return Err(crate::Error::ConfigError(format!(
                "matching.min_match_percentage must be between 0 and 100, got {}",
                pct
            )));
        }
        Ok(())
    }

    /// Get the config file path
    /// Uses XDG on Linux/macOS, AppData on Windows
    pub fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("pantryscout");

        Ok(config_dir.join("config.toml"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpiryConfig {
    /// How many days ahead an item counts as expiring
    #[serde(default = "default_lookahead_days")]
    pub lookahead_days: u32,
}

fn default_lookahead_days() -> u32 {
    3
}

impl Default for ExpiryConfig {
    fn default() -> Self {
        Self {
            lookahead_days: default_lookahead_days(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MatchingConfig {
    /// Recipes below this match percentage are dropped (0-100)
    #[serde(default)]
    pub min_match_percentage: f64,

    /// Cap on the number of suggestions, unlimited when unset
    #[serde(default)]
    pub max_suggestions: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ReportConfig {
    #[serde(default)]
    pub default_period: ReportPeriod,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.expiry.lookahead_days, 3);
        assert_eq!(config.matching.min_match_percentage, 0.0);
        assert_eq!(config.matching.max_suggestions, None);
        assert_eq!(config.report.default_period, ReportPeriod::Weekly);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("lookahead_days"));
        assert!(toml.contains("default_period = \"weekly\""));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[matching]\nmin_match_percentage = 50.0\n").unwrap();
        assert_eq!(config.matching.min_match_percentage, 50.0);
        assert_eq!(config.expiry.lookahead_days, 3);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.expiry.lookahead_days = 5;
        config.matching.max_suggestions = Some(10);
        config.report.default_period = ReportPeriod::Monthly;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[matching]\nmin_match_percentage = 150.0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, crate::Error::ConfigError(_)));
    }
}
