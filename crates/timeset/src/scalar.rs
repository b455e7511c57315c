//! The ordered scalar axis interval endpoints live on.
//!
//! The algebra is generic over the endpoint type: plain integers for abstract
//! schedules, chrono datetimes for wall-clock calendars. Subtracting two
//! endpoints yields a separate span type with its own zero value, so duration
//! sums never assume a numeric literal.

use std::ops::{Add, Sub};

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

/// A point on a totally ordered time axis.
///
/// Subtracting two points yields a [`TimeScalar::Span`], and a point can be
/// shifted backwards by a span (used when an interval's end is pulled in
/// during trimming). Spans form their own ordered additive domain with an
/// explicit zero, which is what lets duration totals start from the right
/// value for any scalar.
pub trait TimeScalar:
    Ord + Copy + Sub<Self, Output = Self::Span> + Sub<Self::Span, Output = Self>
{
    /// Duration between two points of this scalar type.
    type Span: Ord + Copy + Add<Output = Self::Span> + Sub<Output = Self::Span>;

    /// The zero-length span, used to seed duration sums.
    fn zero_span() -> Self::Span;
}

macro_rules! int_time_scalar {
    ($($int:ty),*) => {
        $(
            impl TimeScalar for $int {
                type Span = $int;

                fn zero_span() -> Self::Span {
                    0
                }
            }
        )*
    };
}

int_time_scalar!(i32, i64, u32, u64);

impl TimeScalar for DateTime<Utc> {
    type Span = Duration;

    fn zero_span() -> Self::Span {
        Duration::zero()
    }
}

impl TimeScalar for NaiveDateTime {
    type Span = Duration;

    fn zero_span() -> Self::Span {
        Duration::zero()
    }
}
