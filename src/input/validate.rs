//! Blur-time validators for optional phone and email fields.
//!
//! Both treat an empty field as valid: the fields are optional, and a
//! required-field check belongs to the form, not to the format.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+7\s\([0-9]{3}\)\s[0-9]{3}-[0-9]{2}-[0-9]{2}$")
        .expect("phone pattern is a valid regex")
});

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Whether `text` is empty or exactly `+7 (DDD) DDD-DD-DD`.
#[must_use]
pub fn is_valid_phone(text: &str) -> bool {
    text.is_empty() || PHONE_PATTERN.is_match(text)
}

/// Whether `text` is empty or shaped like `local@domain.tld`.
#[must_use]
pub fn is_valid_email(text: &str) -> bool {
    text.is_empty() || EMAIL_PATTERN.is_match(text)
}

/// Which validator a field uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Phone,
    Email,
}

impl FieldKind {
    /// Field kind implied by an HTML input type, if it has a validator.
    #[must_use]
    pub fn from_input_type(input_type: &str) -> Option<Self> {
        match input_type.trim().to_ascii_lowercase().as_str() {
            "tel" => Some(Self::Phone),
            "email" => Some(Self::Email),
            _ => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Email => "email",
        }
    }
}

/// Outcome shown on the field after blur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldValidity {
    Valid,
    Invalid,
}

impl FieldValidity {
    #[must_use]
    pub const fn from_bool(valid: bool) -> Self {
        if valid { Self::Valid } else { Self::Invalid }
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Style class the field should carry.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Valid => "is-valid",
            Self::Invalid => "is-invalid",
        }
    }
}

/// Run the validator for `kind` against `text`.
#[must_use]
pub fn validate_field(kind: FieldKind, text: &str) -> FieldValidity {
    let valid = match kind {
        FieldKind::Phone => is_valid_phone(text),
        FieldKind::Email => is_valid_email(text),
    };
    FieldValidity::from_bool(valid)
}
