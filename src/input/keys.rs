//! Key events and the digit-only keystroke filter for masked fields.

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

/// Legacy DOM `keyCode` values used by the filters.
pub mod codes {
    pub const BACKSPACE: u32 = 8;
    pub const TAB: u32 = 9;
    pub const ENTER: u32 = 13;
    pub const ESCAPE: u32 = 27;
    pub const END: u32 = 35;
    pub const HOME: u32 = 36;
    pub const ARROW_LEFT: u32 = 37;
    pub const ARROW_UP: u32 = 38;
    pub const ARROW_RIGHT: u32 = 39;
    pub const ARROW_DOWN: u32 = 40;
    pub const DELETE: u32 = 46;
    pub const DIGIT_0: u32 = 48;
    pub const DIGIT_9: u32 = 57;
    pub const KEY_A: u32 = 65;
    pub const KEY_C: u32 = 67;
    pub const KEY_K: u32 = 75;
    pub const KEY_V: u32 = 86;
    pub const KEY_X: u32 = 88;
    pub const NUMPAD_0: u32 = 96;
    pub const NUMPAD_9: u32 = 105;
}

/// Modifier keys held during a key press.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    pub const META: Self = Self {
        meta: true,
        ..Self::NONE
    };

    /// Ctrl on most platforms, Cmd on macOS.
    #[must_use]
    pub const fn accelerator(self) -> bool {
        self.ctrl || self.meta
    }
}

/// One key press: its code plus the modifiers held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyStroke {
    pub code: u32,
    pub modifiers: Modifiers,
}

impl KeyStroke {
    #[must_use]
    pub const fn new(code: u32, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    #[must_use]
    pub const fn plain(code: u32) -> Self {
        Self::new(code, Modifiers::NONE)
    }
}

const EDITING_KEYS: [u32; 5] = [
    codes::DELETE,
    codes::BACKSPACE,
    codes::TAB,
    codes::ESCAPE,
    codes::ENTER,
];

const CLIPBOARD_KEYS: [u32; 4] = [codes::KEY_A, codes::KEY_C, codes::KEY_V, codes::KEY_X];

/// Whether a key press may reach a digits-only field.
///
/// Allowed: top-row digits without Shift, numpad digits, editing keys
/// (backspace, delete, tab, escape, enter), navigation (home, end, arrows)
/// and the select-all/copy/paste/cut accelerator chords.
#[must_use]
pub fn keystroke_allowed(code: u32, modifiers: Modifiers) -> bool {
    if EDITING_KEYS.contains(&code)
        || (modifiers.accelerator() && CLIPBOARD_KEYS.contains(&code))
        || (codes::END..=codes::ARROW_DOWN).contains(&code)
    {
        return true;
    }

    let top_row_digit = (codes::DIGIT_0..=codes::DIGIT_9).contains(&code) && !modifiers.shift;
    let numpad_digit = (codes::NUMPAD_0..=codes::NUMPAD_9).contains(&code);
    top_row_digit || numpad_digit
}

/// [`keystroke_allowed`] over a [`KeyStroke`].
#[must_use]
pub fn stroke_allowed(stroke: &KeyStroke) -> bool {
    keystroke_allowed(stroke.code, stroke.modifiers)
}
