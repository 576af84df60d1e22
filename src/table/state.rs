//! Per-table column sort state and the header-activation cycle.

use serde::{Deserialize, Serialize};

use crate::table::engine::{SortDirection, SortEngine, SortKind};
use crate::table::rows::Row;

// ──────────────────── column direction ────────────────────

/// Sort indicator shown on a column header.
///
/// Activating the same header cycles `None → Ascending → Descending →
/// Ascending → …`; activating another header resets this one to `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnDirection {
    #[default]
    None,
    Ascending,
    Descending,
}

impl ColumnDirection {
    /// Direction after the header is activated again.
    #[must_use]
    pub const fn activated(self) -> Self {
        match self {
            Self::None | Self::Descending => Self::Ascending,
            Self::Ascending => Self::Descending,
        }
    }

    /// The sort pass this indicator stands for, if any.
    #[must_use]
    pub const fn as_sort(self) -> Option<SortDirection> {
        match self {
            Self::None => None,
            Self::Ascending => Some(SortDirection::Ascending),
            Self::Descending => Some(SortDirection::Descending),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    /// Glyph for a header indicator.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::None => "↕",
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// How one column compares and where its indicator currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub index: usize,
    pub kind: SortKind,
    pub direction: ColumnDirection,
}

// ──────────────────── table state ────────────────────

/// Column descriptors owned by a single table instance.
///
/// Invariant: at most one column holds a direction other than `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSortState {
    columns: Vec<ColumnDescriptor>,
}

impl TableSortState {
    #[must_use]
    pub fn new(kinds: impl IntoIterator<Item = SortKind>) -> Self {
        let columns = kinds
            .into_iter()
            .enumerate()
            .map(|(index, kind)| ColumnDescriptor {
                index,
                kind,
                direction: ColumnDirection::None,
            })
            .collect();
        Self { columns }
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    #[must_use]
    pub fn column(&self, index: usize) -> Option<&ColumnDescriptor> {
        self.columns.get(index)
    }

    /// The column currently holding a direction, if any.
    #[must_use]
    pub fn active(&self) -> Option<&ColumnDescriptor> {
        self.columns
            .iter()
            .find(|column| column.direction != ColumnDirection::None)
    }

    /// Advance `index` through the activation cycle and reset every other
    /// column. Returns the direction to sort in, or `None` for an unknown
    /// column (state is left untouched).
    pub fn activate(&mut self, index: usize) -> Option<SortDirection> {
        let next = self.columns.get(index)?.direction.activated();
        for column in &mut self.columns {
            column.direction = if column.index == index {
                next
            } else {
                ColumnDirection::None
            };
        }
        next.as_sort()
    }

    /// Forget every indicator.
    pub fn reset(&mut self) {
        for column in &mut self.columns {
            column.direction = ColumnDirection::None;
        }
    }
}

// ──────────────────── sortable table ────────────────────

/// Rows plus their column state; re-sorts itself on header activation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortableTable {
    rows: Vec<Row>,
    state: TableSortState,
}

impl SortableTable {
    #[must_use]
    pub fn new(rows: Vec<Row>, kinds: impl IntoIterator<Item = SortKind>) -> Self {
        Self {
            rows,
            state: TableSortState::new(kinds),
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub const fn state(&self) -> &TableSortState {
        &self.state
    }

    /// Replace the rows (e.g. after a refresh) and clear the indicators.
    pub fn replace_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.state.reset();
    }

    /// Handle a click on header `index`: update the indicators and reorder
    /// the current rows. Returns the applied direction, or `None` when the
    /// header does not exist.
    pub fn activate_header(&mut self, engine: &SortEngine, index: usize) -> Option<SortDirection> {
        let direction = self.state.activate(index)?;
        let kind = self.state.column(index)?.kind;
        let rows = std::mem::take(&mut self.rows);
        self.rows = engine.sort(rows, index, kind, direction);
        Some(direction)
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}
