//! Error types for interval construction and algebra.

use thiserror::Error;

/// Malformed input rejected when building a set.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructionError {
    /// A `(start, end)` span whose start is after its end.
    #[error("span at index {index} has start after end")]
    StartAfterEnd { index: usize },
}

/// Invariant violations and invalid requests against an [`Intervals`] value.
///
/// The sanity-check variants (`OddTimepointCount`, `LeadingEnd`,
/// `TrailingStart`) indicate a broken timepoint sequence rather than bad
/// caller data; they propagate immediately and nothing is retried.
///
/// [`Intervals`]: crate::Intervals
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalsError {
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    /// The timepoint sequence cannot pair up into intervals.
    #[error("odd number of timepoints ({count}) after normalization")]
    OddTimepointCount { count: usize },

    /// The sequence opens with an end timepoint.
    #[error("interval sequence starts with an end timepoint")]
    LeadingEnd,

    /// The sequence closes with a start timepoint.
    #[error("interval sequence ends with a start timepoint")]
    TrailingStart,

    /// `trim_to_time` asked for more time than the set holds.
    #[error("requested to trim intervals to more than their total time")]
    TrimBeyondTotal,
}

/// Convenience alias used throughout timeset.
pub type Result<T> = std::result::Result<T, IntervalsError>;
