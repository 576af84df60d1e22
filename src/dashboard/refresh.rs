//! Periodic page-refresh policy for admin and analytics screens.
//!
//! Only the decision lives here; scheduling the timer and reloading the page
//! are the host's job.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::config::RefreshConfig;

/// Kind of element holding focus when the refresh timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusedElement {
    Input,
    TextArea,
    Select,
    Other,
}

impl FocusedElement {
    /// Classify an element by its tag name.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_uppercase().as_str() {
            "INPUT" => Self::Input,
            "TEXTAREA" => Self::TextArea,
            "SELECT" => Self::Select,
            _ => Self::Other,
        }
    }

    /// Whether the user may be mid-entry in this element.
    #[must_use]
    pub const fn is_form_control(self) -> bool {
        matches!(self, Self::Input | Self::TextArea | Self::Select)
    }
}

/// Result of one timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshDecision {
    Reload,
    /// The user is typing; try again on the next tick.
    SkipWhileEditing,
    /// The page is not one that auto-refreshes.
    NotApplicable,
    Disabled,
}

/// When a dashboard page reloads itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoRefreshPolicy {
    enabled: bool,
    interval: Duration,
    path_markers: Vec<String>,
}

impl AutoRefreshPolicy {
    #[must_use]
    pub fn new(enabled: bool, interval: Duration, path_markers: Vec<String>) -> Self {
        Self {
            enabled,
            interval,
            path_markers,
        }
    }

    #[must_use]
    pub fn from_config(config: &RefreshConfig) -> Self {
        Self::new(
            config.enabled,
            Duration::from_secs(config.interval_secs),
            config.path_markers.clone(),
        )
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a timer should be armed at all for `path`.
    #[must_use]
    pub fn applies_to(&self, path: &str) -> bool {
        self.enabled
            && self
                .path_markers
                .iter()
                .any(|marker| path.contains(marker.as_str()))
    }

    /// Decide what to do when the timer fires on `path`.
    #[must_use]
    pub fn decide(&self, path: &str, focused: Option<FocusedElement>) -> RefreshDecision {
        if !self.enabled {
            return RefreshDecision::Disabled;
        }
        if !self.applies_to(path) {
            return RefreshDecision::NotApplicable;
        }
        if focused.is_some_and(FocusedElement::is_form_control) {
            return RefreshDecision::SkipWhileEditing;
        }
        RefreshDecision::Reload
    }

    #[must_use]
    pub fn should_reload(&self, path: &str, focused: Option<FocusedElement>) -> bool {
        self.decide(path, focused) == RefreshDecision::Reload
    }
}

impl Default for AutoRefreshPolicy {
    fn default() -> Self {
        Self::from_config(&RefreshConfig::default())
    }
}
