//! Error values returned by validation and storage paths.
//!
//! Failures are returned, never thrown: the hot scoring path stays free of
//! `Result`, and nothing in this crate is fatal to the surrounding
//! application. Storage corruption in particular is recovered locally (the
//! history store falls back to empty) and only logged.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Every failure this crate can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A date range whose start is after its end.
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// A tag filter was supplied but names no tags.
    #[error("tag filter must name at least one tag")]
    EmptyTagFilter,

    /// An item type string outside article/newsletter/trend.
    #[error("unknown item type: {0}")]
    UnknownItemType(String),

    /// A query parameter that failed to parse during decoding.
    #[error("bad value for parameter {field}: {value}")]
    BadParameter { field: &'static str, value: String },

    /// A backing store read or write failed.
    #[error("storage error: {0}")]
    Storage(String),
}
