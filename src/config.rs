//! Runtime configuration: CLI flags, environment, then an optional TOML file

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_BASE_URL;
use crate::mapper::ClockStyle;

const DEFAULT_LOG_LEVEL: &str = "info";

/// Command-line / environment layer. Flattened into the binary's `Args`.
#[derive(clap::Args, Clone, Debug, Default)]
pub struct ConfigArgs {
    /// WeatherAPI.com key
    #[arg(long, env = "WEATHER_WATCH_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Provider base URL
    #[arg(long, env = "WEATHER_WATCH_BASE_URL")]
    pub base_url: Option<String>,

    /// City to look up on startup
    #[arg(long, short)]
    pub city: Option<String>,

    /// Hour convention for the local time line
    #[arg(long, value_enum)]
    pub clock: Option<ClockStyle>,

    /// Write logs to this file (the terminal is owned by the UI)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `weather_watch=trace`
    #[arg(long)]
    pub log_level: Option<String>,

    /// Config file path (defaults to the platform config dir)
    #[arg(long = "config-file")]
    pub config_path: Option<PathBuf>,
}

/// On-disk layer, e.g.
///
/// ```toml
/// api_key = "..."
/// default_city = "London"
/// clock = "24h"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub default_city: Option<String>,
    pub clock: Option<ClockStyle>,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("missing WeatherAPI key: pass --api-key, set WEATHER_WATCH_API_KEY, or add api_key to the config file")]
    MissingApiKey,
}

impl FileConfig {
    /// Load from `path`. A missing file is an empty config.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|dir| dir.join("weather-watch").join("config.toml"))
}

/// Fully resolved settings
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub default_city: Option<String>,
    pub clock: ClockStyle,
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Config {
    /// Read the config file named by `args` (or the default location) and
    /// merge it under the CLI/environment values.
    pub fn load(args: ConfigArgs) -> Result<Self, ConfigError> {
        let file = match args.config_path.clone().or_else(default_config_path) {
            Some(path) => FileConfig::load(&path)?,
            None => FileConfig::default(),
        };
        Self::resolve(args, file)
    }

    pub fn resolve(args: ConfigArgs, file: FileConfig) -> Result<Self, ConfigError> {
        let api_key = args
            .api_key
            .or(file.api_key)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            api_key,
            base_url: args
                .base_url
                .or(file.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            default_city: args
                .city
                .or(file.default_city)
                .filter(|city| !city.trim().is_empty()),
            clock: args.clock.or(file.clock).unwrap_or_default(),
            log_file: args.log_file.or(file.log_file),
            log_level: args
                .log_level
                .or(file.log_level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }
}
