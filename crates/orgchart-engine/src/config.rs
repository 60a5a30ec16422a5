//! Configuration loading from TOML and environment variables.
//!
//! The engine reads its configuration from:
//! 1. A TOML config file (default: config/orgchart.toml)
//! 2. Environment variables (override TOML values)
//!
//! Environment variable prefix: ORGCHART_

use std::path::{Path, PathBuf};

use orgchart_hierarchy::ValidatorConfig;
use serde::{Deserialize, Serialize};

/// Default location of the config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/orgchart.toml";

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrgChartConfig {
    /// Roster source.
    #[serde(default)]
    pub roster: RosterConfig,
    /// Reassignment policy.
    #[serde(default)]
    pub hierarchy: HierarchyConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the initial employee roster comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Path to a JSON roster. Without one the chart starts empty.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Reassignment policy knobs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HierarchyConfig {
    /// Reject `employee -> itself` instead of accepting it as a no-op.
    #[serde(default)]
    pub reject_self_assignment: bool,
    /// Accept candidate managers that are not in the roster.
    #[serde(default)]
    pub allow_unknown_managers: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "orgchart_hierarchy=trace").
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl OrgChartConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, anyhow::Error> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file, with environment variable overrides.
    ///
    /// A missing file is not an error: defaults are used and a warning logged.
    pub fn load(path: Option<&Path>) -> Result<Self, anyhow::Error> {
        let mut config = if let Some(path) = path {
            if path.exists() {
                Self::from_file(path)?
            } else {
                tracing::warn!(
                    path = %path.display(),
                    "Config file not found, using defaults"
                );
                Self::default()
            }
        } else {
            Self::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("ORGCHART_ROSTER_PATH") {
            self.roster.path = Some(PathBuf::from(val));
        }
        if let Some(val) = lookup("ORGCHART_REJECT_SELF_ASSIGNMENT") {
            self.hierarchy.reject_self_assignment = parse_flag(&val);
        }
        if let Some(val) = lookup("ORGCHART_ALLOW_UNKNOWN_MANAGERS") {
            self.hierarchy.allow_unknown_managers = parse_flag(&val);
        }
        if let Some(val) = lookup("ORGCHART_LOG_LEVEL") {
            self.logging.level = val;
        }
    }

    /// The validator settings this configuration describes.
    pub fn validator_config(&self) -> ValidatorConfig {
        ValidatorConfig {
            reject_self_assignment: self.hierarchy.reject_self_assignment,
            allow_unknown_managers: self.hierarchy.allow_unknown_managers,
        }
    }
}

fn parse_flag(val: &str) -> bool {
    val == "true" || val == "1"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OrgChartConfig::default();
        assert!(config.roster.path.is_none());
        assert!(!config.hierarchy.reject_self_assignment);
        assert!(!config.hierarchy.allow_unknown_managers);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = OrgChartConfig::from_toml(
            r#"
            [hierarchy]
            reject_self_assignment = true
            "#,
        )
        .unwrap();
        assert!(config.hierarchy.reject_self_assignment);
        assert!(!config.hierarchy.allow_unknown_managers);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_full_toml() {
        let config = OrgChartConfig::from_toml(
            r#"
            [roster]
            path = "config/roster.json"

            [hierarchy]
            allow_unknown_managers = true

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.roster.path, Some(PathBuf::from("config/roster.json")));
        assert!(config.validator_config().allow_unknown_managers);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_overrides_win_over_file_values() {
        let mut config = OrgChartConfig::from_toml("[logging]\nlevel = \"warn\"").unwrap();
        config.apply_overrides(|key| match key {
            "ORGCHART_LOG_LEVEL" => Some("trace".into()),
            "ORGCHART_REJECT_SELF_ASSIGNMENT" => Some("1".into()),
            "ORGCHART_ROSTER_PATH" => Some("/tmp/roster.json".into()),
            _ => None,
        });
        assert_eq!(config.logging.level, "trace");
        assert!(config.hierarchy.reject_self_assignment);
        assert_eq!(config.roster.path, Some(PathBuf::from("/tmp/roster.json")));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        assert!(OrgChartConfig::load(Some(Path::new("/nonexistent/orgchart.toml"))).is_ok());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(OrgChartConfig::from_toml("[hierarchy\nbroken").is_err());
    }
}
