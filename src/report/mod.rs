//! Reporting utilities: currency formatting, breakdowns and rule tables.

pub mod format;

pub use format::*;
