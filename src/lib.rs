#![forbid(unsafe_code)]

//! dashkit: presentation core for logistics dashboards.
//!
//! Three concerns, all pure and synchronous:
//! 1. **Table sorting**: type-aware, stable, locale-collated column sorts
//! 2. **Masked phone input**: digits reshaped into `+7 (XXX) XXX-XX-XX` as the user types
//! 3. **Field validation**: phone and e-mail checks with an empty-is-valid rule
//!
//! # Library usage
//!
//! Use the [`prelude`] for convenient access to the most common types:
//!
//! ```rust,no_run
//! use dashkit::prelude::*;
//! ```
//!
//! Individual modules can also be imported directly:
//!
//! ```rust,no_run
//! use dashkit::core::config::Config;
//! use dashkit::table::engine::{SortDirection, SortEngine, SortKind};
//! ```

pub mod prelude;

pub mod core;
pub mod dashboard;
pub mod display;
pub mod input;
pub mod logger;
pub mod table;
