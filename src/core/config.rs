use crate::core::dataset::DEFAULT_DATA_PATH;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

fn default_region() -> String {
    "Wales".to_string()
}

fn default_currency_symbol() -> String {
    "£".to_string()
}

fn default_raw_row_limit() -> usize {
    50
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Parquet file with the sale records.
    #[serde(default)]
    pub data_path: Option<String>,
    /// Region name used in chart titles.
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Rows shown in the raw-record table.
    #[serde(default = "default_raw_row_limit")]
    pub raw_row_limit: usize,
    /// Directory that chart descriptions are exported to.
    #[serde(default)]
    pub export_dir: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_path: None,
            region: default_region(),
            currency_symbol: default_currency_symbol(),
            raw_row_limit: default_raw_row_limit(),
            export_dir: None,
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to defaults
    /// when no config file has been created.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "hpx", "hpx")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(self.data_path.as_deref().unwrap_or(DEFAULT_DATA_PATH))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
data_path: "/srv/data/wales.parquet"
region: "Cymru"
currency_symbol: "GBP "
raw_row_limit: 10
export_dir: "charts"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.data_path.as_deref(), Some("/srv/data/wales.parquet"));
        assert_eq!(config.data_path(), PathBuf::from("/srv/data/wales.parquet"));
        assert_eq!(config.region, "Cymru");
        assert_eq!(config.currency_symbol, "GBP ");
        assert_eq!(config.raw_row_limit, 10);
        assert_eq!(config.export_dir.as_deref(), Some("charts"));
    }

    #[test]
    fn test_config_defaults() {
        let config: AppConfig = serde_yaml::from_str("region: \"Wales\"").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.data_path(), PathBuf::from("./data/wales.parquet"));
        assert_eq!(config.currency_symbol, "£");
        assert_eq!(config.raw_row_limit, 50);
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_from_path(dir.path().join("nope.yaml"));
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
