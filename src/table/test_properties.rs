//! Property-based tests for the sort engine and header state machine.
//!
//! Uses `proptest` to check that arbitrary columns sort into a permutation of
//! their input, that ties keep their relative order in both directions, and
//! that unparsable cells always end up after the parsable ones.

use std::collections::HashMap;

use proptest::prelude::*;

use super::engine::{SortDirection, SortEngine, SortKind};
use super::keys::{DateParser, numeric_key};
use super::rows::Row;
use super::state::SortableTable;

// ──────────────────── generators ────────────────────

fn arb_number_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        (-50_i32..50).prop_map(|n| n.to_string()),
        prop::sample::select(vec!["", "abc", "—", "n/a", "1 200 ₸", "2.5", "-0"])
            .prop_map(str::to_string),
    ]
}

fn arb_date_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        (1_u32..28, 1_u32..12).prop_map(|(d, m)| format!("{d:02}.{m:02}.2024")),
        (1_u32..28, 1_u32..12).prop_map(|(d, m)| format!("2024-{m:02}-{d:02}")),
        prop::sample::select(vec!["", "pending", "31.02.2024"]).prop_map(str::to_string),
    ]
}

fn arb_text_cell() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "Алматы", "астана", "Шымкент", "ёлка", "ель", "Zhezkazgan", "", "алматы",
    ])
    .prop_map(str::to_string)
}

fn arb_kind() -> impl Strategy<Value = SortKind> {
    prop_oneof![
        Just(SortKind::Text),
        Just(SortKind::Number),
        Just(SortKind::Date),
    ]
}

fn arb_direction() -> impl Strategy<Value = SortDirection> {
    prop_oneof![Just(SortDirection::Ascending), Just(SortDirection::Descending)]
}

fn arb_cell(kind: SortKind) -> BoxedStrategy<String> {
    match kind {
        SortKind::Text => arb_text_cell().boxed(),
        SortKind::Number => arb_number_cell().boxed(),
        SortKind::Date => arb_date_cell().boxed(),
    }
}

/// Rows of `[key, original position]`.
fn arb_rows() -> impl Strategy<Value = (SortKind, Vec<Row>)> {
    arb_kind().prop_flat_map(|kind| {
        prop::collection::vec(arb_cell(kind), 0..40).prop_map(move |cells| {
            let rows = cells
                .into_iter()
                .enumerate()
                .map(|(position, key)| Row::from_iter([key, position.to_string()]))
                .collect();
            (kind, rows)
        })
    })
}

fn engine() -> SortEngine {
    SortEngine::with_locale("ru").expect("ru collation")
}

fn position(row: &Row) -> usize {
    row.cell(1)
        .and_then(|p| p.parse().ok())
        .expect("generated rows carry their position")
}

fn is_valid(kind: SortKind, cell: &str, dates: &DateParser) -> bool {
    match kind {
        SortKind::Text => true,
        SortKind::Number => numeric_key(cell.trim()).is_some(),
        SortKind::Date => dates.key(cell).is_some(),
    }
}

// ──────────────────── property tests ────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Sorting yields the same multiset of rows.
    #[test]
    fn sort_is_a_permutation((kind, rows) in arb_rows(), direction in arb_direction()) {
        let sorted = engine().sort(rows.clone(), 0, kind, direction);
        prop_assert_eq!(sorted.len(), rows.len());

        let mut counts: HashMap<&Row, i32> = HashMap::new();
        for row in &rows {
            *counts.entry(row).or_default() += 1;
        }
        for row in &sorted {
            *counts.entry(row).or_default() -= 1;
        }
        prop_assert!(counts.values().all(|&n| n == 0));
    }

    /// Rows with identical key text keep their input order.
    #[test]
    fn equal_keys_keep_relative_order(
        (kind, rows) in arb_rows(),
        direction in arb_direction(),
    ) {
        let sorted = engine().sort(rows, 0, kind, direction);
        let mut last_seen: HashMap<String, usize> = HashMap::new();
        for row in &sorted {
            let key = row.cell(0).unwrap_or_default().trim().to_string();
            let pos = position(row);
            if let Some(&previous) = last_seen.get(&key) {
                prop_assert!(previous < pos, "tie {key:?} reordered: {previous} then {pos}");
            }
            last_seen.insert(key, pos);
        }
    }

    /// Unparsable cells form a suffix in either direction.
    #[test]
    fn invalid_cells_sort_last(
        (kind, rows) in arb_rows(),
        direction in arb_direction(),
    ) {
        let dates = DateParser::default();
        let sorted = engine().sort(rows, 0, kind, direction);
        let validity: Vec<bool> = sorted
            .iter()
            .map(|row| is_valid(kind, row.cell(0).unwrap_or_default(), &dates))
            .collect();
        let first_invalid = validity.iter().position(|valid| !valid).unwrap_or(validity.len());
        prop_assert!(validity[first_invalid..].iter().all(|valid| !valid));
    }

    /// Valid numeric keys come out monotone in the requested direction.
    #[test]
    fn numbers_are_monotone(
        cells in prop::collection::vec(arb_number_cell(), 0..40),
        direction in arb_direction(),
    ) {
        let rows: Vec<Row> = cells.iter().map(|c| Row::from_iter([c.as_str()])).collect();
        let sorted = engine().sort(rows, 0, SortKind::Number, direction);
        let values: Vec<f64> = sorted
            .iter()
            .filter_map(|row| numeric_key(row.cell(0).unwrap_or_default().trim()))
            .collect();
        for pair in values.windows(2) {
            match direction {
                SortDirection::Ascending => prop_assert!(pair[0] <= pair[1]),
                SortDirection::Descending => prop_assert!(pair[0] >= pair[1]),
            }
        }
    }

    /// Three activations of one header reproduce the first ordering.
    #[test]
    fn third_activation_matches_first((kind, rows) in arb_rows()) {
        let engine = engine();
        let mut table = SortableTable::new(rows, [kind, SortKind::Number]);
        table.activate_header(&engine, 0);
        let first = table.rows().to_vec();
        table.activate_header(&engine, 0);
        table.activate_header(&engine, 0);
        prop_assert_eq!(table.rows(), first.as_slice());
    }
}
