//! The [`Intervals`] set and its algebra.
//!
//! An `Intervals` value is a normalized union of closed intervals, stored as
//! a flat sorted sequence of start/end timepoints. Every operation reduces to
//! a merge-sweep over that sequence: a depth counter tracks how many operand
//! intervals are open at the current position, and boundaries are emitted
//! exactly when the counter crosses the threshold the operation cares about
//! (1 for normalization, the operand count for intersection, the source
//! weight of the minuend for subtraction).

use std::fmt;
use std::mem;

use serde::{Deserialize, Serialize};

use crate::error::{ConstructionError, IntervalsError, Result};
use crate::scalar::TimeScalar;
use crate::timepoint::{Kind, Timepoint};

/// Semantic tag carried by an interval set.
///
/// Purely informational: it rides along through the algebra and flips under
/// [`Intervals::complement`], but never affects which timepoints are
/// produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Busy,
    Free,
}

impl Label {
    /// The opposite tag.
    pub fn toggled(self) -> Self {
        match self {
            Label::Busy => Label::Free,
            Label::Free => Label::Busy,
        }
    }
}

/// A normalized set of disjoint, non-adjacent closed intervals over `T`.
///
/// The invariant, re-established after every mutation: the timepoint
/// sequence has even length, alternates Start/End beginning with a Start,
/// is sorted by time with ends before starts on ties, and contains no
/// adjacent or nested intervals. An empty sequence is the empty set.
///
/// Serialization exposes the timepoints and label for logging and debugging;
/// it is not a durable storage format, and there is deliberately no
/// `Deserialize` that could smuggle in a non-normalized sequence.
#[derive(Debug, Clone, Serialize)]
pub struct Intervals<T: TimeScalar> {
    timepoints: Vec<Timepoint<T>>,
    label: Option<Label>,
    #[serde(skip)]
    paranoid: bool,
}

/// Sets compare by their normalized timepoints and label. The paranoid flag
/// is configuration, not state.
impl<T: TimeScalar> PartialEq for Intervals<T> {
    fn eq(&self, other: &Self) -> bool {
        self.timepoints == other.timepoints && self.label == other.label
    }
}

impl<T: TimeScalar> Eq for Intervals<T> {}

impl<T: TimeScalar> Default for Intervals<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeScalar> Intervals<T> {
    /// The empty set.
    pub fn new() -> Self {
        Self {
            timepoints: Vec::new(),
            label: None,
            paranoid: false,
        }
    }

    /// Build a set from `(start, end)` spans.
    ///
    /// Spans may overlap, nest, or abut in any order; normalization collapses
    /// them into canonical disjoint form. Zero-width spans vanish. An empty
    /// list yields the empty set.
    ///
    /// # Errors
    ///
    /// [`ConstructionError::StartAfterEnd`] if any span has `start > end`.
    pub fn from_spans(spans: impl IntoIterator<Item = (T, T)>) -> Result<Self> {
        let mut set = Self::new();
        set.timepoints = spans_to_timepoints(spans)?;
        set.normalize()?;
        Ok(set)
    }

    /// Build a set from raw timepoints.
    ///
    /// The input may be unsorted and may contain overlapping or nested
    /// intervals; it is sorted and normalized. Timepoints that cannot pair up
    /// into intervals fail the sanity check.
    pub fn from_timepoints(timepoints: impl IntoIterator<Item = Timepoint<T>>) -> Result<Self> {
        let mut set = Self::new();
        set.timepoints = timepoints.into_iter().collect();
        set.normalize()?;
        Ok(set)
    }

    /// Attach a semantic label to this set.
    #[must_use]
    pub fn with_label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }

    /// Re-sort and re-normalize at the start of every mutating operation,
    /// trading speed for robustness. Off by default: the sequence is owned
    /// and private, so each operation can rely on the invariant the previous
    /// one re-established.
    #[must_use]
    pub fn paranoid(mut self, paranoid: bool) -> Self {
        self.paranoid = paranoid;
        self
    }

    /// True iff the set contains no intervals.
    pub fn is_empty(&self) -> bool {
        self.timepoints.is_empty()
    }

    /// The label attached to this set, if any.
    pub fn label(&self) -> Option<Label> {
        self.label
    }

    /// The raw ordered timepoint sequence.
    pub fn timepoints(&self) -> &[Timepoint<T>] {
        &self.timepoints
    }

    /// Export as an ordered list of `(start, end)` spans.
    pub fn to_spans(&self) -> Vec<(T, T)> {
        let mut spans = Vec::with_capacity(self.timepoints.len() / 2);
        let mut open = None;
        for tp in &self.timepoints {
            match tp.kind {
                Kind::Start => open = Some(tp.time),
                Kind::End => {
                    if let Some(start) = open.take() {
                        spans.push((start, tp.time));
                    }
                }
            }
        }
        spans
    }

    /// Restore the canonical sorted, disjoint, alternating form.
    ///
    /// Safe to call at any time; construction and every mutating operation
    /// call it internally.
    pub fn normalize(&mut self) -> Result<()> {
        self.timepoints.sort();
        self.normalize_sorted()
    }

    /// Normalization passes over an already sorted sequence.
    fn normalize_sorted(&mut self) -> Result<()> {
        if self.timepoints.is_empty() {
            return Ok(());
        }

        // Cancellation: an end immediately followed by a start at the same
        // time is an exact touching point, and both boundaries go away.
        // Removing a pair can expose another such pair, so compare against
        // the running output rather than the input.
        let mut clean: Vec<Timepoint<T>> = Vec::with_capacity(self.timepoints.len());
        for tp in self.timepoints.drain(..) {
            let cancels = clean.last().is_some_and(|prev| {
                prev.kind == Kind::End && tp.kind == Kind::Start && prev.time == tp.time
            });
            if cancels {
                clean.pop();
            } else {
                clean.push(tp);
            }
        }

        // Overlap and nesting collapse: keep only the transitions between
        // "outside any interval" and "inside at least one".
        let mut depth = 0i64;
        let mut collapsed = Vec::with_capacity(clean.len());
        for tp in clean {
            match tp.kind {
                Kind::Start => {
                    if depth < 1 {
                        collapsed.push(tp);
                    }
                    depth += 1;
                }
                Kind::End => {
                    if depth == 1 {
                        collapsed.push(tp);
                    }
                    depth -= 1;
                }
            }
        }
        self.timepoints = collapsed;

        self.sanity_check()
    }

    /// Verify the structural invariant of a normalized sequence.
    fn sanity_check(&self) -> Result<()> {
        let (Some(first), Some(last)) = (self.timepoints.first(), self.timepoints.last()) else {
            return Ok(());
        };
        if self.timepoints.len() % 2 == 1 {
            return Err(IntervalsError::OddTimepointCount {
                count: self.timepoints.len(),
            });
        }
        if first.kind == Kind::End {
            return Err(IntervalsError::LeadingEnd);
        }
        if last.kind == Kind::Start {
            return Err(IntervalsError::TrailingStart);
        }
        Ok(())
    }

    fn renormalize_if_paranoid(&mut self) -> Result<()> {
        if self.paranoid {
            self.normalize()?;
        }
        Ok(())
    }

    /// Add `(start, end)` spans to the set, re-normalizing afterwards.
    ///
    /// # Errors
    ///
    /// [`ConstructionError::StartAfterEnd`] (wrapped) if any span has
    /// `start > end`.
    pub fn add_spans(&mut self, spans: impl IntoIterator<Item = (T, T)>) -> Result<()> {
        let added = spans_to_timepoints(spans)?;
        self.add_timepoints(added)
    }

    /// Add raw timepoints to the set, re-normalizing afterwards.
    ///
    /// An empty input is a no-op.
    pub fn add_timepoints(
        &mut self,
        timepoints: impl IntoIterator<Item = Timepoint<T>>,
    ) -> Result<()> {
        self.renormalize_if_paranoid()?;
        let before = self.timepoints.len();
        self.timepoints.extend(timepoints);
        if self.timepoints.len() == before {
            return Ok(());
        }
        self.normalize()
    }

    /// The union of `self` and all `others`, as a new set carrying `self`'s
    /// label.
    ///
    /// Union needs no algorithm of its own: the concatenated timepoints are
    /// handed to the constructor, whose overlap collapse is exactly the
    /// union of all inputs.
    pub fn union(&self, others: &[&Intervals<T>]) -> Result<Intervals<T>> {
        let mut merged = self.timepoints.clone();
        for other in others {
            merged.extend_from_slice(&other.timepoints);
        }
        let mut result = Intervals::from_timepoints(merged)?;
        result.label = self.label;
        Ok(result)
    }

    /// Intersect `self` with every set in `others`, as a new set.
    ///
    /// A point is inside the intersection only while every operand is
    /// simultaneously open, i.e. while the sweep depth equals the operand
    /// count (`self` included). Only the transitions into and out of that
    /// state are emitted.
    ///
    /// An empty intersection is returned as a new empty set with no label.
    pub fn intersect(&self, others: &[&Intervals<T>]) -> Result<Intervals<T>> {
        let extra: usize = others.iter().map(|o| o.timepoints.len()).sum();
        let mut merged: Vec<(Timepoint<T>, i64)> =
            Vec::with_capacity(self.timepoints.len() + extra);
        merged.extend(self.timepoints.iter().map(|&tp| (tp, 1)));
        for other in others {
            merged.extend(other.timepoints.iter().map(|&tp| (tp, 1)));
        }
        merged.sort_by(|a, b| a.0.cmp(&b.0));

        let full_depth = 1 + others.len() as i64;
        let crossings = sweep_at_depth(&merged, full_depth);
        if crossings.is_empty() {
            return Ok(Intervals::new());
        }

        let mut result = Intervals::from_timepoints(crossings)?;
        result.label = self.label;
        Ok(result)
    }

    /// The relative complement `self - other`: points in `self` that are not
    /// in `other`, as a new set.
    ///
    /// Neither operand is modified. Source weights (`self` = 2, `other` = 1)
    /// are carried alongside the merged timepoints rather than written into
    /// them, so a start raises the sweep depth by its source weight and the
    /// depth sits at exactly 2 precisely when the position is inside `self`
    /// and outside `other`.
    ///
    /// When either side is empty the result is an independent copy of
    /// `self`. Otherwise the result keeps `self`'s label only if both
    /// operands agree on it.
    pub fn subtract(&self, other: &Intervals<T>) -> Result<Intervals<T>> {
        if other.is_empty() || self.is_empty() {
            return Ok(self.clone());
        }

        let mut merged: Vec<(Timepoint<T>, i64)> =
            Vec::with_capacity(self.timepoints.len() + other.timepoints.len());
        merged.extend(self.timepoints.iter().map(|&tp| (tp, 2)));
        merged.extend(other.timepoints.iter().map(|&tp| (tp, 1)));
        merged.sort_by(|a, b| a.0.cmp(&b.0));

        let crossings = sweep_at_depth(&merged, 2);

        let mut result = Intervals::from_timepoints(crossings)?;
        result.label = if self.label == other.label {
            self.label
        } else {
            None
        };
        Ok(result)
    }

    /// Invert the set within `[absolute_start, absolute_end]`, in place:
    /// every gap becomes an interval and vice versa. Toggles the label.
    ///
    /// The inverted sequence is canonical by construction, so no re-sort or
    /// re-normalize happens. Complement is self-inverse within the same
    /// bounds.
    pub fn complement(&mut self, absolute_start: T, absolute_end: T) -> Result<()> {
        self.renormalize_if_paranoid()?;

        if self.timepoints.is_empty() {
            self.timepoints.push(Timepoint::start(absolute_start));
            self.timepoints.push(Timepoint::end(absolute_end));
        } else {
            let tps = mem::take(&mut self.timepoints);
            let mut inverted = Vec::with_capacity(tps.len() + 2);

            // A set already touching the lower bound has no gap in front of
            // it; the complement then opens where the first interval ends.
            let interior = if tps[0].time == absolute_start {
                inverted.push(Timepoint::start(tps[1].time));
                &tps[2..]
            } else {
                inverted.push(Timepoint::start(absolute_start));
                &tps[..]
            };

            // Interior boundaries swap roles.
            for tp in interior {
                inverted.push(match tp.kind {
                    Kind::Start => Timepoint::end(tp.time),
                    Kind::End => Timepoint::start(tp.time),
                });
            }

            // Close at the upper bound. A dangling start sitting exactly on
            // the bound would open a zero-width gap; drop it instead.
            if let Some(last) = inverted.last().copied() {
                if last.kind == Kind::Start {
                    if last.time == absolute_end {
                        inverted.pop();
                    } else {
                        inverted.push(Timepoint::end(absolute_end));
                    }
                }
            }

            self.timepoints = inverted;
        }

        self.label = self.label.map(Label::toggled);
        Ok(())
    }

    /// Total duration across all intervals; the zero span for the empty set.
    pub fn total_time(&self) -> T::Span {
        let mut total = T::zero_span();
        let mut open = None;
        for tp in &self.timepoints {
            match tp.kind {
                Kind::Start => open = Some(tp.time),
                Kind::End => {
                    if let Some(start) = open.take() {
                        total = total + (tp.time - start);
                    }
                }
            }
        }
        total
    }

    /// Start of the first interval at least `length` long, scanning in
    /// ascending order.
    ///
    /// `None` means no interval is long enough; a missing slot is an
    /// ordinary outcome here, not an error.
    pub fn find_interval_of_length(&self, length: T::Span) -> Option<T> {
        let mut open = None;
        for tp in &self.timepoints {
            match tp.kind {
                Kind::Start => open = Some(tp.time),
                Kind::End => {
                    if let Some(start) = open {
                        if tp.time - start >= length {
                            return Some(start);
                        }
                    }
                }
            }
        }
        None
    }

    /// Trim from the front so the remaining intervals sum to exactly
    /// `total_time`, in place.
    ///
    /// The interval in which the budget runs out has its end pulled back by
    /// the overshoot; everything after it is discarded. The trimmed sequence
    /// is canonical by construction. An empty set ignores the request.
    ///
    /// # Errors
    ///
    /// [`IntervalsError::TrimBeyondTotal`] when the request exceeds the
    /// set's total duration.
    pub fn trim_to_time(&mut self, total_time: T::Span) -> Result<()> {
        self.renormalize_if_paranoid()?;
        if self.timepoints.is_empty() {
            return Ok(());
        }

        let mut trimmed: Vec<Timepoint<T>> = Vec::with_capacity(self.timepoints.len());
        let mut accumulated = T::zero_span();
        let mut start = self.timepoints[0].time;
        for tp in &self.timepoints {
            match tp.kind {
                Kind::Start => {
                    start = tp.time;
                    trimmed.push(*tp);
                }
                Kind::End => {
                    accumulated = accumulated + (tp.time - start);
                    if accumulated > total_time {
                        let overshoot = accumulated - total_time;
                        trimmed.push(Timepoint::end(tp.time - overshoot));
                        self.timepoints = trimmed;
                        return Ok(());
                    }
                    trimmed.push(*tp);
                    if accumulated == total_time {
                        self.timepoints = trimmed;
                        return Ok(());
                    }
                }
            }
        }
        Err(IntervalsError::TrimBeyondTotal)
    }

    /// Drop every interval strictly shorter than `duration`, in place.
    ///
    /// Survivors keep their order. Removing whole intervals cannot break the
    /// alternation invariant, so no re-normalization happens.
    pub fn remove_intervals_smaller_than(&mut self, duration: T::Span) -> Result<()> {
        self.renormalize_if_paranoid()?;
        let tps = mem::take(&mut self.timepoints);
        let mut kept = Vec::with_capacity(tps.len());
        let mut open: Option<Timepoint<T>> = None;
        for tp in tps {
            match tp.kind {
                Kind::Start => open = Some(tp),
                Kind::End => {
                    if let Some(start) = open.take() {
                        if tp.time - start.time >= duration {
                            kept.push(start);
                            kept.push(tp);
                        }
                    }
                }
            }
        }
        self.timepoints = kept;
        Ok(())
    }
}

/// Human-readable listing of the timepoints, each tagged with its role.
impl<T: TimeScalar + fmt::Debug> fmt::Display for Intervals<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tp in &self.timepoints {
            let tag = match tp.kind {
                Kind::Start => "start",
                Kind::End => "end",
            };
            write!(f, "{:?}({}) ", tp.time, tag)?;
        }
        Ok(())
    }
}

/// Validate `(start, end)` spans and flatten them into timepoints.
fn spans_to_timepoints<T: TimeScalar>(
    spans: impl IntoIterator<Item = (T, T)>,
) -> std::result::Result<Vec<Timepoint<T>>, ConstructionError> {
    let mut tps = Vec::new();
    for (index, (start, end)) in spans.into_iter().enumerate() {
        if start > end {
            return Err(ConstructionError::StartAfterEnd { index });
        }
        tps.push(Timepoint::start(start));
        tps.push(Timepoint::end(end));
    }
    Ok(tps)
}

/// Emit the boundary transitions into and out of `target` depth while
/// sweeping a sorted sequence of weighted timepoints.
///
/// A start adds its weight to the running depth, an end subtracts it. When
/// the depth sits at `target` just before a boundary, that boundary closes a
/// result interval; when it lands on `target` just after, it opens one. The
/// output may still contain cancelling pairs at shared times and is fed
/// through normalization by the callers.
fn sweep_at_depth<T: TimeScalar>(merged: &[(Timepoint<T>, i64)], target: i64) -> Vec<Timepoint<T>> {
    let mut depth = 0i64;
    let mut crossings = Vec::new();
    for &(tp, weight) in merged {
        if depth == target {
            crossings.push(Timepoint::end(tp.time));
        }
        match tp.kind {
            Kind::Start => depth += weight,
            Kind::End => depth -= weight,
        }
        if depth == target {
            crossings.push(Timepoint::start(tp.time));
        }
    }
    crossings
}
