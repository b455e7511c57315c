//! Interval boundary markers.

use serde::{Deserialize, Serialize};

/// Role of a timepoint: opens or closes an interval.
///
/// `End` is declared before `Start` so the derived ordering sorts an end
/// before a start at the same time. Abutting intervals then meet as an
/// (End, Start) pair that normalization cancels, rather than surviving as a
/// zero-width gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    End,
    Start,
}

/// A single interval boundary: a time paired with its role.
///
/// The derived ordering compares time first and kind second, which is
/// exactly the two-key comparator every sweep in this crate sorts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timepoint<T> {
    pub time: T,
    #[serde(rename = "type")]
    pub kind: Kind,
}

impl<T> Timepoint<T> {
    /// A timepoint opening an interval at `time`.
    pub fn start(time: T) -> Self {
        Self {
            time,
            kind: Kind::Start,
        }
    }

    /// A timepoint closing an interval at `time`.
    pub fn end(time: T) -> Self {
        Self {
            time,
            kind: Kind::End,
        }
    }
}
