//! Comparison-key extraction for numeric and date columns.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse a numeric cell the way dashboard tables expect.
///
/// Every character other than an ASCII digit, `.` or `-` is dropped first, so
/// `"1 200 ₸"` reads as `1200`. The longest numeric prefix of what remains is
/// then parsed, so `"1.2.3"` is `1.2` and `"12-3"` is `12`. Returns `None`
/// when no digit survives.
#[must_use]
pub fn numeric_key(text: &str) -> Option<f64> {
    let filtered: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    parse_float_prefix(&filtered)
}

fn parse_float_prefix(filtered: &str) -> Option<f64> {
    let bytes = filtered.as_bytes();
    let mut end = usize::from(bytes.first() == Some(&b'-'));

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }
    filtered[..end].parse::<f64>().ok()
}

/// Calendar-date parser shared by date columns and date display.
///
/// RFC 3339 timestamps are tried first, then each configured pattern as a
/// date-time, then each pattern as a bare date (midnight).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParser {
    formats: Vec<String>,
}

impl DateParser {
    #[must_use]
    pub fn new(formats: Vec<String>) -> Self {
        Self { formats }
    }

    #[must_use]
    pub fn formats(&self) -> &[String] {
        &self.formats
    }

    /// Parse `text` (already trimmed or not) into a naive UTC date-time.
    #[must_use]
    pub fn parse(&self, text: &str) -> Option<NaiveDateTime> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if let Ok(stamp) = DateTime::parse_from_rfc3339(text) {
            return Some(stamp.naive_utc());
        }

        self.formats
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
            .or_else(|| {
                self.formats.iter().find_map(|fmt| {
                    NaiveDate::parse_from_str(text, fmt)
                        .ok()
                        .and_then(|date| date.and_hms_opt(0, 0, 0))
                })
            })
    }

    /// Milliseconds since the Unix epoch, or `None` for an invalid date.
    #[must_use]
    pub fn key(&self, text: &str) -> Option<i64> {
        self.parse(text)
            .map(|stamp| stamp.and_utc().timestamp_millis())
    }
}

impl Default for DateParser {
    fn default() -> Self {
        Self::new(crate::core::config::TableConfig::default().date_formats)
    }
}
