//! Dates rendered the way Russian-locale tables show them.

use chrono::NaiveDateTime;

use crate::table::keys::DateParser;

const DATE_PATTERN: &str = "%d.%m.%Y";
const DATE_TIME_PATTERN: &str = "%d.%m.%Y, %H:%M";

/// Render a parsed timestamp as `dd.mm.yyyy` or `dd.mm.yyyy, HH:MM`.
#[must_use]
pub fn format_timestamp(stamp: &NaiveDateTime, include_time: bool) -> String {
    let pattern = if include_time {
        DATE_TIME_PATTERN
    } else {
        DATE_PATTERN
    };
    stamp.format(pattern).to_string()
}

/// Parse `text` with `parser` and render it; `None` when it is not a date.
#[must_use]
pub fn format_date(parser: &DateParser, text: &str, include_time: bool) -> Option<String> {
    parser
        .parse(text)
        .map(|stamp| format_timestamp(&stamp, include_time))
}
