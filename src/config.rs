use crate::connectivity::Connectivity;
use crate::error::{Error, Result};
use crate::patterns::{PatternCatalog, DEFAULT_PATTERN};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Default location of the configuration file
pub const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_rows")]
    pub rows: i32,
    #[serde(default = "default_cols")]
    pub cols: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_pattern")]
    pub default_pattern: String,
    #[serde(default)]
    pub connectivity: Connectivity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default = "default_step_interval_ms")]
    pub step_interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
    #[serde(default = "default_origin")]
    pub origin_x: f32,
    #[serde(default = "default_origin")]
    pub origin_y: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub enable_action_log: bool,
    #[serde(default = "default_action_log_path")]
    pub action_log_path: String,
}

// Default values
fn default_rows() -> i32 { 40 }
fn default_cols() -> i32 { 50 }
fn default_pattern() -> String { DEFAULT_PATTERN.to_string() }
fn default_step_interval_ms() -> u64 { 150 }
fn default_window_title() -> String { "Wavefront - Pathfinder".to_string() }
fn default_cell_size() -> f32 { 10.0 }
fn default_origin() -> f32 { 20.0 }
fn default_log_filter() -> String { "info".to_string() }
fn default_action_log_path() -> String { "action_log.json".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_pattern: default_pattern(),
            connectivity: Connectivity::default(),
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            step_interval_ms: default_step_interval_ms(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            cell_size: default_cell_size(),
            origin_x: default_origin(),
            origin_y: default_origin(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            enable_action_log: false,
            action_log_path: default_action_log_path(),
        }
    }
}

/// Where the configuration came from, reported once logging is up
#[derive(Debug)]
pub enum ConfigSource {
    File(PathBuf),
    Missing(PathBuf),
    Invalid { path: PathBuf, error: String },
}

impl ConfigSource {
    pub fn report(&self) {
        match self {
            ConfigSource::File(path) => info!(path = %path.display(), "loaded configuration"),
            ConfigSource::Missing(path) => {
                info!(path = %path.display(), "no configuration file, using defaults")
            }
            ConfigSource::Invalid { path, error } => {
                warn!(path = %path.display(), %error, "failed to parse configuration, using defaults")
            }
        }
    }
}

impl Config {
    /// Load `config.toml`, or use defaults if it is missing or broken
    pub fn load() -> (Self, ConfigSource) {
        Self::load_from(Path::new(CONFIG_PATH))
    }

    pub fn load_from(path: &Path) -> (Self, ConfigSource) {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return (Config::default(), ConfigSource::Missing(path.to_path_buf()));
            }
            Err(e) => {
                return (
                    Config::default(),
                    ConfigSource::Invalid {
                        path: path.to_path_buf(),
                        error: e.to_string(),
                    },
                );
            }
        };

        match Self::parse(&contents) {
            Ok(config) => (config, ConfigSource::File(path.to_path_buf())),
            Err(e) => (
                Config::default(),
                ConfigSource::Invalid {
                    path: path.to_path_buf(),
                    error: e.to_string(),
                },
            ),
        }
    }

    /// Parse TOML text; missing keys take their defaults.
    ///
    /// A `default_pattern` the catalog does not know is an error.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        if !PatternCatalog::contains(&config.engine.default_pattern) {
            return Err(Error::UnknownPattern {
                name: config.engine.default_pattern,
            });
        }
        Ok(config)
    }

    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.scheduler.step_interval_ms)
    }
}
