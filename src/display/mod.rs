//! Display formatters for amounts and dates.

pub mod currency;
pub mod date;
