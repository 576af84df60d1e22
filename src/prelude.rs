//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use dashkit::prelude::*;
//! ```

// Core
pub use crate::core::config::Config;
pub use crate::core::errors::{DashError, Result};

// Table
pub use crate::table::engine::{SortDirection, SortEngine, SortKind};
pub use crate::table::keys::{DateParser, numeric_key};
pub use crate::table::rows::{Row, read_delimited};
pub use crate::table::state::{ColumnDirection, SortableTable, TableSortState};

// Input
pub use crate::input::keys::{KeyStroke, Modifiers, keystroke_allowed};
pub use crate::input::phone::{FormattedNumber, MaskedField, format_phone};
pub use crate::input::validate::{FieldKind, FieldValidity, is_valid_email, is_valid_phone};

// Dashboard and display
pub use crate::dashboard::refresh::{AutoRefreshPolicy, RefreshDecision};
pub use crate::dashboard::shortcuts::{ShortcutAction, resolve_shortcut};
pub use crate::display::currency::format_currency;
pub use crate::display::date::format_date;

// Logging
pub use crate::logger::activity::{ActivityEvent, ActivityLog};
