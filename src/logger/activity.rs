//! Activity facade: typed events in, JSONL lines out.
//!
//! Front-ends build one [`ActivityLog`] from [`LoggingConfig`] and report
//! through it. When logging is disabled every call is a no-op.

#![allow(missing_docs)]

use std::path::PathBuf;

use crate::core::config::LoggingConfig;
use crate::core::errors::DashError;
use crate::logger::jsonl::{EventType, JsonlConfig, JsonlWriter, LogEntry, Severity};

/// Something worth recording.
#[derive(Debug, Clone, PartialEq)]
pub enum ActivityEvent {
    ConfigLoaded {
        config_hash: String,
    },
    TableSorted {
        column: usize,
        kind: &'static str,
        direction: &'static str,
        rows: usize,
        duration_us: u64,
    },
    PhoneFormatted {
        digits: usize,
        complete: bool,
    },
    PhoneRejected {
        digits: usize,
    },
    ValidationFailed {
        field: &'static str,
    },
    Error {
        code: String,
        message: String,
    },
}

impl ActivityEvent {
    /// Convenience constructor for a failed action.
    #[must_use]
    pub fn from_error(error: &DashError) -> Self {
        Self::Error {
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }

    fn into_entry(self) -> LogEntry {
        match self {
            Self::ConfigLoaded { config_hash } => {
                LogEntry::new(EventType::ConfigLoaded, Severity::Info)
                    .with_details(format!("config_hash={config_hash}"))
            }
            Self::TableSorted {
                column,
                kind,
                direction,
                rows,
                duration_us,
            } => {
                let mut entry = LogEntry::new(EventType::TableSorted, Severity::Info);
                entry.column = Some(column);
                entry.kind = Some(kind.to_string());
                entry.direction = Some(direction.to_string());
                entry.rows = Some(rows);
                entry.duration_us = Some(duration_us);
                entry.ok = Some(true);
                entry
            }
            Self::PhoneFormatted { digits, complete } => {
                let mut entry = LogEntry::new(EventType::PhoneFormatted, Severity::Info);
                entry.field = Some("phone".to_string());
                entry.digits = Some(digits);
                entry.ok = Some(complete);
                entry
            }
            Self::PhoneRejected { digits } => {
                let mut entry = LogEntry::new(EventType::PhoneRejected, Severity::Warning);
                entry.field = Some("phone".to_string());
                entry.digits = Some(digits);
                entry.ok = Some(false);
                entry
            }
            Self::ValidationFailed { field } => {
                let mut entry = LogEntry::new(EventType::ValidationFailed, Severity::Warning);
                entry.field = Some(field.to_string());
                entry.ok = Some(false);
                entry
            }
            Self::Error { code, message } => {
                let mut entry = LogEntry::new(EventType::Error, Severity::Error);
                entry.ok = Some(false);
                entry.error_code = Some(code);
                entry.error_message = Some(message);
                entry
            }
        }
    }
}

/// Synchronous activity logger.
#[derive(Debug)]
pub enum ActivityLog {
    Disabled,
    Jsonl(JsonlWriter),
}

impl ActivityLog {
    /// Build from config. `override_path` (the CLI `--log` flag) forces
    /// logging on at that path.
    #[must_use]
    pub fn from_config(config: &LoggingConfig, override_path: Option<PathBuf>) -> Self {
        match override_path {
            Some(path) => Self::jsonl(path),
            None if config.enabled => Self::jsonl(config.jsonl_path.clone()),
            None => Self::Disabled,
        }
    }

    #[must_use]
    pub fn jsonl(path: impl Into<PathBuf>) -> Self {
        Self::Jsonl(JsonlWriter::open(JsonlConfig::new(path)))
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        matches!(self, Self::Jsonl(_))
    }

    pub fn record(&mut self, event: ActivityEvent) {
        if let Self::Jsonl(writer) = self {
            writer.write_entry(&event.into_entry());
        }
    }

    pub fn flush(&mut self) {
        if let Self::Jsonl(writer) = self {
            writer.flush();
        }
    }
}
