//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// File locations.
    #[serde(default)]
    pub files: FilesConfig,
    /// Report output configuration.
    #[serde(default)]
    pub output: OutputConfig,
}

/// File locations.
#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    /// Parameter file supplying default rates and amounts.
    #[serde(default = "default_params")]
    pub params: PathBuf,
    /// Append-only run log.
    #[serde(default = "default_log")]
    pub log: PathBuf,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            params: default_params(),
            log: default_log(),
        }
    }
}

fn default_params() -> PathBuf {
    PathBuf::from("budget.par")
}

fn default_log() -> PathBuf {
    PathBuf::from("budget.log")
}

/// Report output configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Output format: `table` or `json`.
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_format() -> String {
    "table".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("GRANTCALC").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.files.params, PathBuf::from("budget.par"));
        assert_eq!(config.files.log, PathBuf::from("budget.log"));
        assert_eq!(config.output.format, "table");
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        temp_env::with_vars_unset(["GRANTCALC__FILES__LOG", "GRANTCALC__OUTPUT__FORMAT"], || {
            let config = AppConfig::load().unwrap();
            assert_eq!(config.files.log, PathBuf::from("budget.log"));
            assert_eq!(config.output.format, "table");
        });
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("GRANTCALC__FILES__LOG", Some("runs/grant.log")),
                ("GRANTCALC__OUTPUT__FORMAT", Some("json")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.files.log, PathBuf::from("runs/grant.log"));
                assert_eq!(config.files.params, PathBuf::from("budget.par"));
                assert_eq!(config.output.format, "json");
            },
        );
    }
}
