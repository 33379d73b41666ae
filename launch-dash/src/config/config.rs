use crate::launch::ColumnMapping;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub dashboard: DashboardConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind the HTTP server to
    pub host: String,

    pub port: u16,

    /// Number of computed figures kept in memory
    pub figure_cache_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// CSV file with the launch records, read once at startup
    pub csv_path: PathBuf,

    /// Source column names
    pub columns: ColumnMapping,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub title: String,

    /// Range selector bounds and step, in kg
    pub slider_min: f64,
    pub slider_max: f64,
    pub slider_step: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// tracing-subscriber filter directive, RUST_LOG wins when set
    pub filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8052,
            figure_cache_size: 256,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("data/spacex_launch_dash.csv"),
            columns: ColumnMapping::default(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "SpaceX Launch Records Dashboard".to_string(),
            slider_min: 0.0,
            slider_max: 10000.0,
            slider_step: 1000.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Load config from an explicit file, or from the default location.
    /// An explicit path must exist; a missing default file means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default_path = Self::get_config_path()?;
                if !default_path.exists() {
                    debug!(target: "config", "No config at {:?}, using defaults", default_path);
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Result<()> {
        let d = &self.dashboard;
        if !(d.slider_min < d.slider_max) {
            anyhow::bail!(
                "dashboard.slider_min ({}) must be below dashboard.slider_max ({})",
                d.slider_min,
                d.slider_max
            );
        }
        if !(d.slider_step > 0.0) {
            anyhow::bail!("dashboard.slider_step must be positive");
        }
        Ok(())
    }

    /// Apply `DASH_HOST`, `DASH_PORT` and `DASH_CSV_PATH` from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("DASH_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("DASH_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!(target: "config", "Ignoring invalid DASH_PORT {:?}", port),
            }
        }
        if let Some(path) = lookup("DASH_CSV_PATH") {
            self.data.csv_path = PathBuf::from(path);
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("launch-dash").join("config.toml"))
    }

    /// Create a default config file with comments
    pub fn create_default_with_comments() -> String {
        r#"# Launch dashboard configuration
# Location: ~/.config/launch-dash/config.toml (Linux)
#           %APPDATA%\launch-dash\config.toml (Windows)

[server]
# Address and port of the dashboard
# DASH_HOST / DASH_PORT override these
host = "127.0.0.1"
port = 8052

# How many computed figures to keep in memory
figure_cache_size = 256

[data]
# Launch records, read once at startup (DASH_CSV_PATH overrides)
csv_path = "data/spacex_launch_dash.csv"

# Source column names
[data.columns]
site = "Launch Site"
payload_mass = "Payload Mass (kg)"
booster_category = "Booster Version Category"
outcome = "class"

[dashboard]
title = "SpaceX Launch Records Dashboard"

# Payload range selector, in kg
slider_min = 0.0
slider_max = 10000.0
slider_step = 1000.0

[logging]
# tracing filter, e.g. "info" or "launch_dash=debug,tower_http=debug"
# RUST_LOG takes precedence when set
filter = "info"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8052);
        assert_eq!(config.dashboard.slider_max, 10000.0);
        assert_eq!(config.data.columns.outcome, "class");
    }

    #[test]
    fn test_commented_template_matches_defaults() {
        let parsed = Config::from_toml(&Config::create_default_with_comments()).unwrap();
        let defaults = Config::default();
        assert_eq!(parsed.server.port, defaults.server.port);
        assert_eq!(parsed.data.csv_path, defaults.data.csv_path);
        assert_eq!(parsed.data.columns, defaults.data.columns);
        assert_eq!(parsed.dashboard, defaults.dashboard);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::from_toml("[server]\nport = 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_invalid_slider_rejected() {
        let err = Config::from_toml("[dashboard]\nslider_min = 5.0\nslider_max = 1.0\n")
            .unwrap_err();
        assert!(err.to_string().contains("slider_min"));
        assert!(Config::from_toml("[dashboard]\nslider_step = 0.0\n").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("DASH_HOST", "0.0.0.0"),
            ("DASH_PORT", "not-a-port"),
            ("DASH_CSV_PATH", "/data/launches.csv"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides_from(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.server.host, "0.0.0.0");
        // invalid port is ignored
        assert_eq!(config.server.port, 8052);
        assert_eq!(config.data.csv_path, PathBuf::from("/data/launches.csv"));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        assert!(Config::load(Some(Path::new("/no/such/config.toml"))).is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.server.port, parsed.server.port);
        assert_eq!(config.dashboard, parsed.dashboard);
    }
}
