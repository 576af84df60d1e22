//! Table presentation: row snapshots, sort keys, the sort engine, and
//! per-table header state.

pub mod engine;
pub mod keys;
pub mod rows;
pub mod state;

#[cfg(test)]
mod test_properties;
