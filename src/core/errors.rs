//! DKT-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, DashError>;

/// Top-level error type for dashkit.
///
/// Only the edges of the crate can fail (configuration, locale data, I/O).
/// Sorting, formatting and validation are total and never produce one.
#[derive(Debug, Error)]
pub enum DashError {
    #[error("[DKT-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[DKT-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[DKT-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[DKT-1101] invalid locale tag {tag:?}: {details}")]
    InvalidLocale { tag: String, details: String },

    #[error("[DKT-1102] collation data unavailable for {tag:?}: {details}")]
    Collation { tag: String, details: String },

    #[error("[DKT-2001] malformed table input at line {line}: {details}")]
    TableInput { line: usize, details: String },

    #[error("[DKT-2101] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[DKT-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DashError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "DKT-1001",
            Self::MissingConfig { .. } => "DKT-1002",
            Self::ConfigParse { .. } => "DKT-1003",
            Self::InvalidLocale { .. } => "DKT-1101",
            Self::Collation { .. } => "DKT-1102",
            Self::TableInput { .. } => "DKT-2001",
            Self::Serialization { .. } => "DKT-2101",
            Self::Io { .. } => "DKT-3002",
        }
    }

    /// Whether the failure was caused by what the user supplied, as opposed
    /// to the environment.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfig { .. }
                | Self::MissingConfig { .. }
                | Self::ConfigParse { .. }
                | Self::InvalidLocale { .. }
                | Self::TableInput { .. }
        )
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for DashError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for DashError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}

impl From<toml::ser::Error> for DashError {
    fn from(value: toml::ser::Error) -> Self {
        Self::Serialization {
            context: "toml",
            details: value.to_string(),
        }
    }
}
