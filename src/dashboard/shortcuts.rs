//! Page-wide keyboard shortcuts.

use serde::{Deserialize, Serialize};

use crate::input::keys::{KeyStroke, codes};

/// Name of the input that `Ctrl+K` focuses.
pub const SEARCH_FIELD_NAME: &str = "tracking_number";

/// What a page-level shortcut asks the UI to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortcutAction {
    /// Focus the tracking-number search box.
    FocusSearch,
    /// Hide every open modal dialog.
    CloseModals,
}

/// Resolve a key press to a shortcut, or `None` to let it through.
///
/// `Ctrl+K` (lowercase only, so Shift blocks it) focuses search; `Escape`
/// closes modals regardless of modifiers.
#[must_use]
pub fn resolve_shortcut(stroke: &KeyStroke) -> Option<ShortcutAction> {
    match stroke.code {
        codes::KEY_K if stroke.modifiers.ctrl && !stroke.modifiers.shift => {
            Some(ShortcutAction::FocusSearch)
        }
        codes::ESCAPE => Some(ShortcutAction::CloseModals),
        _ => None,
    }
}
