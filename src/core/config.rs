//! Configuration system: TOML file + env var overrides + smart defaults.

#![allow(missing_docs)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::core::errors::{DashError, Result};

/// Full dashkit configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Config {
    pub table: TableConfig,
    pub refresh: RefreshConfig,
    pub logging: LoggingConfig,
    pub paths: PathsConfig,
}

/// Table sorting behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableConfig {
    /// BCP-47 tag used for text-column collation.
    pub locale: String,
    /// `strftime` patterns tried, in order, after RFC 3339 for date columns.
    pub date_formats: Vec<String>,
}

/// Dashboard auto-refresh policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RefreshConfig {
    pub enabled: bool,
    pub interval_secs: u64,
    /// Page paths containing any of these markers are auto-refreshed.
    pub path_markers: Vec<String>,
}

/// JSONL activity logging.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub jsonl_path: PathBuf,
}

/// Filesystem paths used by dashkit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    pub config_file: PathBuf,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            locale: "ru".to_string(),
            date_formats: [
                "%Y-%m-%d %H:%M:%S",
                "%Y-%m-%dT%H:%M:%S",
                "%Y-%m-%d %H:%M",
                "%d.%m.%Y %H:%M:%S",
                "%d.%m.%Y, %H:%M",
                "%d.%m.%Y %H:%M",
                "%Y-%m-%d",
                "%d.%m.%Y",
                "%m/%d/%Y",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 300,
            path_markers: vec!["/admin".to_string(), "/analytics".to_string()],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            jsonl_path: home_dir()
                .join(".local")
                .join("share")
                .join("dashkit")
                .join("activity.jsonl"),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            config_file: home_dir()
                .join(".config")
                .join("dashkit")
                .join("config.toml"),
        }
    }
}

fn home_dir() -> PathBuf {
    env::var_os("HOME").map_or_else(
        || {
            eprintln!("[DKT-CONFIG] WARNING: HOME not set, falling back to /tmp for data paths");
            PathBuf::from("/tmp")
        },
        PathBuf::from,
    )
}

impl Config {
    /// Default configuration path.
    #[must_use]
    pub fn default_path() -> PathBuf {
        PathsConfig::default().config_file
    }

    /// Load config from default or explicit path, then apply env overrides.
    ///
    /// Missing config file is not an error when loading from default path; defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path_buf = path.map_or_else(Self::default_path, Path::to_path_buf);
        let is_explicit_path = path.is_some();

        let mut cfg = if path_buf.exists() {
            let raw = fs::read_to_string(&path_buf).map_err(|source| DashError::Io {
                path: path_buf.clone(),
                source,
            })?;
            toml::from_str::<Self>(&raw)?
        } else if is_explicit_path {
            return Err(DashError::MissingConfig { path: path_buf });
        } else {
            Self::default()
        };

        cfg.paths.config_file = path_buf;
        cfg.apply_env_overrides_from(env_var)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Deterministic hash of the effective config for logging.
    ///
    /// FNV-1a over the canonical JSON form, stable across processes.
    pub fn stable_hash(&self) -> Result<String> {
        let canonical = serde_json::to_string(self)?;
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in canonical.as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
        Ok(format!("{hash:016x}"))
    }

    fn apply_env_overrides_from<F>(&mut self, mut lookup: F) -> Result<()>
    where
        F: FnMut(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("DASHKIT_TABLE_LOCALE") {
            self.table.locale = raw.trim().to_string();
        }

        if let Some(raw) = lookup("DASHKIT_REFRESH_ENABLED") {
            self.refresh.enabled = parse_env_bool("DASHKIT_REFRESH_ENABLED", &raw)?;
        }
        if let Some(raw) = lookup("DASHKIT_REFRESH_INTERVAL_SECS") {
            self.refresh.interval_secs = parse_env_u64("DASHKIT_REFRESH_INTERVAL_SECS", &raw)?;
        }
        if let Some(raw) = lookup("DASHKIT_REFRESH_PATH_MARKERS") {
            self.refresh.path_markers = raw
                .split(',')
                .map(str::trim)
                .filter(|marker| !marker.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(raw) = lookup("DASHKIT_LOGGING_ENABLED") {
            self.logging.enabled = parse_env_bool("DASHKIT_LOGGING_ENABLED", &raw)?;
        }
        if let Some(raw) = lookup("DASHKIT_LOGGING_JSONL_PATH") {
            self.logging.jsonl_path = PathBuf::from(raw);
        }

        Ok(())
    }

    /// Check invariants that serde defaults cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.table.locale.trim().is_empty() {
            return Err(DashError::InvalidConfig {
                details: "table.locale must not be empty".to_string(),
            });
        }
        if let Err(error) = self.table.locale.parse::<icu_locid::Locale>() {
            return Err(DashError::InvalidConfig {
                details: format!("table.locale {:?} is not a valid tag: {error}", self.table.locale),
            });
        }

        if self.table.date_formats.is_empty() {
            return Err(DashError::InvalidConfig {
                details: "table.date_formats must list at least one pattern".to_string(),
            });
        }
        for pattern in &self.table.date_formats {
            if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                return Err(DashError::InvalidConfig {
                    details: format!("table.date_formats entry {pattern:?} is not a valid strftime pattern"),
                });
            }
        }

        if self.refresh.interval_secs == 0 {
            return Err(DashError::InvalidConfig {
                details: "refresh.interval_secs must be > 0".to_string(),
            });
        }
        if self.refresh.enabled && self.refresh.path_markers.is_empty() {
            return Err(DashError::InvalidConfig {
                details: "refresh.path_markers cannot be empty when refresh.enabled=true"
                    .to_string(),
            });
        }
        for marker in &self.refresh.path_markers {
            if !marker.starts_with('/') {
                return Err(DashError::InvalidConfig {
                    details: format!("refresh.path_markers entry {marker:?} must start with '/'"),
                });
            }
        }

        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|raw| !raw.trim().is_empty())
}

fn parse_env_u64(name: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|error| DashError::ConfigParse {
            context: "env",
            details: format!("{name}={raw:?}: {error}"),
        })
}

fn parse_env_bool(name: &str, raw: &str) -> Result<bool> {
    raw.trim()
        .parse::<bool>()
        .map_err(|error| DashError::ConfigParse {
            context: "env",
            details: format!("{name}={raw:?}: {error}"),
        })
}
