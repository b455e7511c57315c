//! Construction, validation, and export behaviour.

use timeset::{ConstructionError, Intervals, IntervalsError, Kind, Label, Timepoint};

fn set(spans: &[(i64, i64)]) -> Intervals<i64> {
    Intervals::from_spans(spans.iter().copied()).expect("valid spans")
}

#[test]
fn empty_list_yields_empty_set() {
    let empty: Intervals<i64> = Intervals::from_spans([]).unwrap();
    assert!(empty.is_empty());
    assert!(empty.timepoints().is_empty());
    assert_eq!(empty, Intervals::new());
}

#[test]
fn spans_become_sorted_timepoints() {
    let intervals = set(&[(1, 3), (4, 5)]);
    assert_eq!(
        intervals.timepoints(),
        &[
            Timepoint::start(1),
            Timepoint::end(3),
            Timepoint::start(4),
            Timepoint::end(5),
        ]
    );
}

#[test]
fn unsorted_spans_are_sorted_on_construction() {
    let intervals = set(&[(4, 5), (1, 3)]);
    assert_eq!(intervals.to_spans(), vec![(1, 3), (4, 5)]);
}

#[test]
fn start_after_end_is_rejected_with_index() {
    let result = Intervals::from_spans([(1, 3), (5, 4)]);
    assert_eq!(
        result.unwrap_err(),
        IntervalsError::Construction(ConstructionError::StartAfterEnd { index: 1 })
    );
}

#[test]
fn zero_width_span_vanishes() {
    let intervals = set(&[(2, 2)]);
    assert!(intervals.is_empty());
}

#[test]
fn construction_from_timepoints() {
    let intervals = Intervals::from_timepoints([
        Timepoint::start(1),
        Timepoint::end(3),
        Timepoint::start(4),
        Timepoint::end(5),
    ])
    .unwrap();
    assert_eq!(intervals.to_spans(), vec![(1, 3), (4, 5)]);
}

#[test]
fn unpaired_timepoints_fail_the_sanity_check() {
    let result = Intervals::from_timepoints([Timepoint::start(1)]);
    assert_eq!(
        result.unwrap_err(),
        IntervalsError::OddTimepointCount { count: 1 }
    );
}

#[test]
fn kind_tie_break_sorts_end_before_start() {
    assert!(Kind::End < Kind::Start);
    assert!(Timepoint::end(3) < Timepoint::start(3));
    assert!(Timepoint::start(3) < Timepoint::end(4));
}

#[test]
fn round_trip_through_spans() {
    let original = set(&[(1, 3), (4, 5)]).with_label(Label::Busy);
    let rebuilt = Intervals::from_spans(original.to_spans())
        .unwrap()
        .with_label(Label::Busy);
    assert_eq!(original, rebuilt);
}

#[test]
fn equality_requires_matching_label() {
    let unlabeled = set(&[(1, 3)]);
    let labeled = set(&[(1, 3)]).with_label(Label::Free);
    assert_ne!(unlabeled, labeled);
    assert_eq!(labeled, set(&[(1, 3)]).with_label(Label::Free));
}

#[test]
fn equality_ignores_the_paranoid_flag() {
    let relaxed = set(&[(1, 3)]);
    let careful = set(&[(1, 3)]).paranoid(true);
    assert_eq!(relaxed, careful);
}

#[test]
fn is_empty_tracks_the_timepoint_sequence() {
    let mut intervals = set(&[(1, 2)]);
    assert!(!intervals.is_empty());
    intervals.remove_intervals_smaller_than(10).unwrap();
    assert!(intervals.is_empty());
}

#[test]
fn display_tags_each_timepoint_with_its_role() {
    let intervals = set(&[(1, 3)]);
    assert_eq!(intervals.to_string(), "1(start) 3(end) ");
}

#[test]
fn serialized_debug_form_exposes_timepoints_and_label() {
    let intervals = set(&[(1, 3)]).with_label(Label::Busy);
    let json = serde_json::to_value(&intervals).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "timepoints": [
                { "time": 1, "type": "start" },
                { "time": 3, "type": "end" },
            ],
            "label": "busy",
        })
    );
}
