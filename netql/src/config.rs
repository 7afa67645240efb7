//! Configuration for netql tools.
//!
//! NETQL_ROOT resolution order:
//! 1. Explicit path passed to Config::load_from()
//! 2. NETQL_ROOT environment variable
//! 3. Default: platform config dir (~/.config/netql on Linux)

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::query::DEFAULT_MAX_QUERY_LEN;
use crate::{Error, Result};

/// netql configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding config.toml.
    #[serde(skip)]
    pub netql_root: PathBuf,

    /// Longest query accepted, in bytes.
    #[serde(default = "default_max_query_len")]
    pub max_query_len: usize,

    /// Default output format for parsed rules.
    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How parsed rules are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(Error::Config(format!(
                "Unknown output format '{}' (expected text or json)",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format.
    #[default]
    Pretty,
    /// JSON lines.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,
    /// Log output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

fn default_max_query_len() -> usize {
    DEFAULT_MAX_QUERY_LEN
}

impl Config {
    /// Create a new config with the given NETQL_ROOT.
    pub fn with_root(netql_root: impl Into<PathBuf>) -> Self {
        Self {
            netql_root: netql_root.into(),
            max_query_len: default_max_query_len(),
            format: OutputFormat::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Load config from NETQL_ROOT/config.toml, or create default.
    pub fn load() -> Result<Self> {
        let netql_root = resolve_netql_root()?;
        Self::load_from(&netql_root)
    }

    /// Load config from a specific NETQL_ROOT.
    pub fn load_from(netql_root: &Path) -> Result<Self> {
        let config_path = netql_root.join("config.toml");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let mut config: Config = toml::from_str(&contents)
                .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
            config.netql_root = netql_root.to_path_buf();
            Ok(config)
        } else {
            Ok(Self::with_root(netql_root))
        }
    }

    /// Save config to NETQL_ROOT/config.toml, creating the directory.
    pub fn save(&self) -> Result<()> {
        std::fs::create_dir_all(&self.netql_root)?;
        std::fs::write(self.config_path(), self.to_toml()?)?;
        Ok(())
    }

    /// Render the config as it would be written to config.toml.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Path to the config file.
    pub fn config_path(&self) -> PathBuf {
        self.netql_root.join("config.toml")
    }
}

/// Resolve NETQL_ROOT using the standard resolution order.
fn resolve_netql_root() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("NETQL_ROOT") {
        return Ok(PathBuf::from(path));
    }

    if let Some(proj_dirs) = ProjectDirs::from("", "", "netql") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = std::env::var("HOME")
        .map_err(|_| Error::Config("Could not determine home directory".to_string()))?;
    Ok(PathBuf::from(home).join(".config/netql"))
}
