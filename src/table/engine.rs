//! Type-aware, stable table sorting.
//!
//! Every column declares a [`SortKind`]. Cells are trimmed and turned into
//! comparison keys at sort time; text is compared with locale collation,
//! numbers and dates numerically. Cells that do not parse as a number or a
//! date become an invalid key that is placed after every valid key in BOTH
//! directions, so blank or placeholder cells never jump to the top of a
//! descending sort.

use std::cmp::Ordering;
use std::fmt;

use icu_collator::{Collator, CollatorOptions};
use icu_locid::Locale;
use serde::{Deserialize, Serialize};

use crate::core::config::TableConfig;
use crate::core::errors::{DashError, Result};
use crate::table::keys::{DateParser, numeric_key};
use crate::table::rows::Row;

/// Comparison semantics of a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKind {
    /// Locale collation of the trimmed cell text.
    #[default]
    Text,
    /// Decimal value extracted from the cell.
    Number,
    /// Calendar date or date-time.
    Date,
}

impl SortKind {
    /// Resolve a header annotation such as `data-sort="number"`.
    ///
    /// Unknown or missing annotations fall back to [`SortKind::Text`].
    #[must_use]
    pub fn from_annotation(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "number" | "numeric" => Self::Number,
            "date" => Self::Date,
            _ => Self::Text,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
        }
    }
}

/// Requested direction of one sort pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Orient a comparison of two valid keys.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum SortKey<'a> {
    Text(&'a str),
    Number(f64),
    Date(i64),
    Invalid,
}

/// Sorts row snapshots by one column.
pub struct SortEngine {
    locale: String,
    collator: Collator,
    dates: DateParser,
}

impl fmt::Debug for SortEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortEngine")
            .field("locale", &self.locale)
            .field("date_formats", &self.dates.formats().len())
            .finish_non_exhaustive()
    }
}

impl SortEngine {
    /// Build an engine from the table section of the configuration.
    pub fn new(config: &TableConfig) -> Result<Self> {
        let mut engine = Self::with_locale(&config.locale)?;
        engine.dates = DateParser::new(config.date_formats.clone());
        Ok(engine)
    }

    /// Build an engine for `tag` with the default date patterns.
    pub fn with_locale(tag: &str) -> Result<Self> {
        let locale: Locale = tag.trim().parse().map_err(|error| DashError::InvalidLocale {
            tag: tag.to_string(),
            details: format!("{error}"),
        })?;
        let collator = Collator::try_new(&(&locale).into(), CollatorOptions::new()).map_err(
            |error| DashError::Collation {
                tag: tag.to_string(),
                details: format!("{error}"),
            },
        )?;

        Ok(Self {
            locale: locale.to_string(),
            collator,
            dates: DateParser::default(),
        })
    }

    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    #[must_use]
    pub const fn date_parser(&self) -> &DateParser {
        &self.dates
    }

    /// Compare two strings with the engine's collation.
    #[must_use]
    pub fn collate(&self, left: &str, right: &str) -> Ordering {
        self.collator.compare(left, right)
    }

    /// Reorder `rows` by `column`.
    ///
    /// The result is a permutation of the input. Ties keep their input order
    /// in both directions. A row without a cell at `column` is treated as
    /// holding an empty cell; callers should not rely on this.
    #[must_use]
    pub fn sort(
        &self,
        rows: Vec<Row>,
        column: usize,
        kind: SortKind,
        direction: SortDirection,
    ) -> Vec<Row> {
        let order = self.order(&rows, column, kind, direction);
        let mut slots: Vec<Option<Row>> = rows.into_iter().map(Some).collect();
        order
            .into_iter()
            .filter_map(|index| slots.get_mut(index).and_then(Option::take))
            .collect()
    }

    /// Positions of `rows` in sorted order, without moving anything.
    #[must_use]
    pub fn order(
        &self,
        rows: &[Row],
        column: usize,
        kind: SortKind,
        direction: SortDirection,
    ) -> Vec<usize> {
        let keys: Vec<SortKey<'_>> = rows
            .iter()
            .map(|row| self.key(row.cell(column).unwrap_or_default().trim(), kind))
            .collect();

        let mut order: Vec<usize> = (0..rows.len()).collect();
        // `sort_by` is stable: equal keys keep their input positions.
        order.sort_by(|&left, &right| self.compare(keys[left], keys[right], direction));
        order
    }

    fn key<'a>(&self, text: &'a str, kind: SortKind) -> SortKey<'a> {
        match kind {
            SortKind::Text => SortKey::Text(text),
            SortKind::Number => numeric_key(text).map_or(SortKey::Invalid, SortKey::Number),
            SortKind::Date => self.dates.key(text).map_or(SortKey::Invalid, SortKey::Date),
        }
    }

    fn compare(&self, left: SortKey<'_>, right: SortKey<'_>, direction: SortDirection) -> Ordering {
        match (left, right) {
            (SortKey::Invalid, SortKey::Invalid) => Ordering::Equal,
            // Sentinel placement ignores direction.
            (SortKey::Invalid, _) => Ordering::Greater,
            (_, SortKey::Invalid) => Ordering::Less,
            (SortKey::Text(a), SortKey::Text(b)) => direction.apply(self.collator.compare(a, b)),
            (SortKey::Number(a), SortKey::Number(b)) => {
                direction.apply(a.partial_cmp(&b).unwrap_or(Ordering::Equal))
            }
            (SortKey::Date(a), SortKey::Date(b)) => direction.apply(a.cmp(&b)),
            // One column always yields one key kind.
            _ => Ordering::Equal,
        }
    }
}
