//! Page-level behaviour around the core: keyboard shortcuts and the
//! auto-refresh policy.

pub mod refresh;
pub mod shortcuts;
