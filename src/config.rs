use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

use crate::data::aggregate::AggregateSettings;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "SALARY_EXPLORER_CONFIG";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("top_n must be at least 1")]
    ZeroTopN,
    #[error("histogram_bins must be at least 1")]
    ZeroBins,
    #[error("target_role must not be empty")]
    EmptyTargetRole,
}

/// Viewer settings. Every field has a default, so `{}` is a valid file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Number of roles in the ranking chart.
    pub top_n: usize,
    /// Bucket count of the compensation histogram.
    pub histogram_bins: usize,
    /// Role whose per-country means are shown on the geography tab.
    pub target_role: String,
    /// Dataset opened at start-up.
    pub data_path: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let settings = AggregateSettings::default();
        DashboardConfig {
            top_n: settings.top_n,
            histogram_bins: settings.histogram_bins,
            target_role: settings.target_role,
            data_path: None,
        }
    }
}

impl DashboardConfig {
    /// Read from the file named by `SALARY_EXPLORER_CONFIG`, or defaults.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: DashboardConfig = serde_json::from_str(text).context("parsing config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 {
            return Err(ConfigError::ZeroTopN);
        }
        if self.histogram_bins == 0 {
            return Err(ConfigError::ZeroBins);
        }
        if self.target_role.trim().is_empty() {
            return Err(ConfigError::EmptyTargetRole);
        }
        Ok(())
    }

    pub fn aggregate_settings(&self) -> AggregateSettings {
        AggregateSettings {
            top_n: self.top_n,
            histogram_bins: self.histogram_bins,
            target_role: self.target_role.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = DashboardConfig::from_json("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.top_n, 10);
        assert_eq!(config.histogram_bins, 30);
        assert_eq!(config.target_role, "Data Scientist");
    }

    #[test]
    fn overrides_are_applied() {
        let config = DashboardConfig::from_json(
            r#"{"top_n": 5, "target_role": "Data Engineer", "data_path": "salaries.csv"}"#,
        )
        .unwrap();
        let settings = config.aggregate_settings();
        assert_eq!(settings.top_n, 5);
        assert_eq!(settings.histogram_bins, 30);
        assert_eq!(settings.target_role, "Data Engineer");
        assert_eq!(config.data_path, Some(PathBuf::from("salaries.csv")));
    }

    #[test]
    fn zero_bins_are_rejected() {
        let err = DashboardConfig::from_json(r#"{"histogram_bins": 0}"#).unwrap_err();
        assert_eq!(err.downcast_ref::<ConfigError>(), Some(&ConfigError::ZeroBins));
    }

    #[test]
    fn blank_role_is_rejected() {
        let config = DashboardConfig {
            target_role: "  ".to_string(),
            ..DashboardConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyTargetRole));
    }
}
