//! Line-level parsing utilities.
//!
//! This module contains the dialect patterns and the 12-hour clock
//! conversion shared by the in-memory normalizer and the streaming reader.

pub mod dialect;

pub use dialect::{
    ClockTime, DateFields, Dialect, DialectSet, FormatMatch, Meridiem, to_24_hour,
};
