//! # timeset
//!
//! Set algebra over disjoint time intervals, the free/busy primitive for
//! schedulers and calendar agents.
//!
//! An [`Intervals`] value holds a normalized union of closed intervals over
//! any ordered scalar (plain integers, chrono datetimes) as a flat sorted
//! sequence of start/end timepoints. Everything else is algebra over that
//! sequence: union, intersection, subtraction, complement within a bounding
//! range, and duration queries like "first interval at least this long".
//!
//! ## Quick start
//!
//! ```rust
//! use timeset::{Intervals, Label};
//!
//! let busy = Intervals::from_spans([(9, 12), (13, 17)])?.with_label(Label::Busy);
//! let lunch = Intervals::from_spans([(12, 13)])?;
//!
//! // Closed intervals touch at 12 and 13 but share no interior, so lunch
//! // stays free.
//! assert!(busy.intersect(&[&lunch])?.is_empty());
//!
//! // Invert the busy blocks inside working hours to get the free ones.
//! let mut free = busy.clone();
//! free.complement(8, 18)?;
//! assert_eq!(free.to_spans(), vec![(8, 9), (12, 13), (17, 18)]);
//! assert_eq!(free.label(), Some(Label::Free));
//! # Ok::<(), timeset::IntervalsError>(())
//! ```
//!
//! ## Modules
//!
//! - [`intervals`] — the `Intervals` set and its algebra
//! - [`timepoint`] — start/end boundary markers
//! - [`scalar`] — the `TimeScalar` axis trait and its integer/chrono impls
//! - [`error`] — error types

pub mod error;
pub mod intervals;
pub mod scalar;
pub mod timepoint;

pub use error::{ConstructionError, IntervalsError, Result};
pub use intervals::{Intervals, Label};
pub use scalar::TimeScalar;
pub use timepoint::{Kind, Timepoint};
