//! Masked phone-number input: `+7 (XXX) XXX-XX-XX`.
//!
//! The mask is rebuilt from scratch on every edit from the digits in the
//! field, so the output depends only on those digits. The one exception is
//! an edit that pushes the number past [`MAX_DIGITS`]: it is bounced back by
//! dropping the last character of the previous display.

use serde::{Deserialize, Serialize};

/// Digits in a complete number, country code included.
pub const MAX_DIGITS: usize = 11;

/// Country code rendered as the `+7` prefix.
pub const COUNTRY_DIGIT: char = '7';

/// Domestic trunk prefix rewritten to [`COUNTRY_DIGIT`].
pub const TRUNK_PREFIX: char = '8';

/// Result of one formatting pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedNumber {
    /// Text to write back into the field.
    pub display_text: String,
    /// Digits represented by `display_text`.
    pub digit_count: usize,
    /// Whether all [`MAX_DIGITS`] digits are present.
    pub is_complete: bool,
    /// Whether the edit was rejected as too long.
    pub rejected: bool,
}

impl FormattedNumber {
    fn from_digits(digits: &str) -> Self {
        let digit_count = digits.len();
        Self {
            display_text: render(digits),
            digit_count,
            is_complete: digit_count == MAX_DIGITS,
            rejected: false,
        }
    }

    fn bounced(previous_display: &str) -> Self {
        let mut display_text = previous_display.to_string();
        display_text.pop();
        let digit_count = display_text.chars().filter(char::is_ascii_digit).count();
        Self {
            display_text,
            digit_count,
            is_complete: digit_count == MAX_DIGITS,
            rejected: true,
        }
    }
}

/// Reformat a phone field after an edit.
///
/// `previous_display` is what the field showed before the edit and
/// `raw_edited_text` is its content after the platform applied the edit.
#[must_use]
pub fn format_phone(previous_display: &str, raw_edited_text: &str) -> FormattedNumber {
    let digits = normalized_digits(raw_edited_text);
    if digits.len() > MAX_DIGITS {
        return FormattedNumber::bounced(previous_display);
    }
    FormattedNumber::from_digits(&digits)
}

/// ASCII digits of `raw`, in order, with a leading trunk prefix rewritten.
#[must_use]
pub fn normalized_digits(raw: &str) -> String {
    let mut digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.starts_with(TRUNK_PREFIX) {
        digits.replace_range(..1, COUNTRY_DIGIT.encode_utf8(&mut [0; 4]));
    }
    digits
}

// `digits` is ASCII-only, so byte ranges are char boundaries.
fn render(digits: &str) -> String {
    let len = digits.len();
    if len == 0 {
        return String::new();
    }

    let mut out = String::with_capacity(18);
    out.push('+');
    out.push(COUNTRY_DIGIT);
    if len > 1 {
        out.push_str(" (");
        out.push_str(&digits[1..len.min(4)]);
    }
    if len > 4 {
        out.push_str(") ");
        out.push_str(&digits[4..len.min(7)]);
    }
    if len > 7 {
        out.push('-');
        out.push_str(&digits[7..len.min(9)]);
    }
    if len > 9 {
        out.push('-');
        out.push_str(&digits[9..len.min(11)]);
    }
    out
}

/// A phone field's display text, updated edit by edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskedField {
    display: String,
}

impl MaskedField {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing text (e.g. a server-rendered value), reformatted.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        let mut field = Self::new();
        field.apply_edit(text);
        field
    }

    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Apply the field's post-edit text and store the formatted result.
    pub fn apply_edit(&mut self, raw_edited_text: &str) -> FormattedNumber {
        let formatted = format_phone(&self.display, raw_edited_text);
        self.display.clone_from(&formatted.display_text);
        formatted
    }

    /// Simulate typing one character at the end of the field.
    pub fn type_char(&mut self, ch: char) -> FormattedNumber {
        let mut raw = self.display.clone();
        raw.push(ch);
        self.apply_edit(&raw)
    }

    /// Simulate a backspace at the end of the field.
    pub fn backspace(&mut self) -> FormattedNumber {
        let mut raw = self.display.clone();
        raw.pop();
        self.apply_edit(&raw)
    }

    pub fn clear(&mut self) {
        self.display.clear();
    }
}
