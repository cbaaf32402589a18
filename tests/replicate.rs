mod common;

use common::*;
use iterkit::hint::MAX_SIZE;
use iterkit::{replicate, Error, Resumable, Source, Value};
use test_case::test_case;

#[test_case(0 ; "zero")]
#[test_case(1 ; "one")]
fn times_must_exceed_one(times: usize) {
    assert!(matches!(replicate(&range(3), times), Err(Error::Config(_))));
}

#[test]
fn repeats_every_item() {
    let mut it = replicate(&range(3), 3).unwrap();
    assert_eq!(drain(&mut it), ints(&[0, 0, 0, 1, 1, 1, 2, 2, 2]));
    let mut it = replicate(&v("[]"), 4).unwrap();
    assert!(drain(&mut it).is_empty());
}

#[test]
fn accessors() {
    let mut it = replicate(&v("[7, 8]"), 2).unwrap();
    assert_eq!(it.times(), 2);
    assert_eq!(it.timescurrent(), 0);
    assert!(it.current().is_none());
    it.advance().unwrap();
    assert_eq!(it.timescurrent(), 1);
    assert_eq!(it.current(), Some(&Value::Int(7)));
}

#[test]
fn failures_propagate() {
    let mut it = replicate(&fail_next(1), 2).unwrap();
    assert_eq!(it.advance().unwrap(), Some(Value::Int(1)));
    assert_eq!(it.advance().unwrap(), Some(Value::Int(1)));
    assert_eq!(it.advance().unwrap_err(), next_failed());
    assert_eq!(replicate(&fail_iter(), 2).unwrap_err(), iter_failed());
}

#[test]
fn length_hint_counts_pending_repeats() {
    let mut it = replicate(&v("[1, 2]"), 3).unwrap();
    for remaining in (0..=6).rev() {
        assert_eq!(it.length_hint().unwrap(), remaining);
        it.advance().unwrap();
    }
}

#[test]
fn length_hint_failures() {
    let mut it = replicate(&fail_length_hint(&[1]), 2).unwrap();
    assert_eq!(it.length_hint().unwrap_err(), hint_failed());
    assert_eq!(it.collect_values().unwrap_err(), hint_failed());
}

#[test]
fn length_hint_overflow() {
    let it = replicate(&fixed_length_hint(&[1], MAX_SIZE / 2), 3).unwrap();
    assert!(matches!(it.length_hint(), Err(Error::Overflow(_))));

    let it = replicate(&fixed_length_hint(&[1], MAX_SIZE / 2), 2).unwrap();
    assert_eq!(it.length_hint().unwrap(), MAX_SIZE - 1);

    // the product fits, the repeats still owed for the current item do not
    let mut it = replicate(&fixed_length_hint(&[1], MAX_SIZE / 10), 10).unwrap();
    assert_eq!(it.length_hint().unwrap(), MAX_SIZE / 10 * 10);
    it.advance().unwrap();
    assert!(matches!(it.length_hint(), Err(Error::Overflow(_))));
    assert!(matches!(it.collect_values(), Err(Error::Overflow(_))));
}

#[test]
fn snapshot_round_trip() {
    let mut it = replicate(&v("[1, 2]"), 3).unwrap();
    assert_eq!(it.capture_state(), v("(None, 0)"));
    it.advance().unwrap();
    it.advance().unwrap();
    let state = it.capture_state();
    assert_eq!(state, v("(1, 2)"));

    let fresh = replicate(&v("[2]"), 3).unwrap();
    let mut fresh = restored(fresh, &state);
    assert_eq!(fresh.length_hint().unwrap(), 4);
    assert_eq!(drain(&mut fresh), ints(&[1, 2, 2, 2]));
}

#[test]
fn current_is_ignored_without_repeats() {
    let mut it = replicate(&v("[5]"), 2).unwrap();
    it.restore_state(&v("(9, 0)")).unwrap();
    assert!(it.current().is_none());
    assert_eq!(drain(&mut it), ints(&[5, 5]));
}

#[test]
fn malformed_snapshots_are_rejected() {
    let mut it = replicate(&v("[1, 2]"), 2).unwrap();
    assert!(matches!(
        it.restore_state(&v("[None, 0]")),
        Err(Error::StateShape { .. })
    ));
    assert!(matches!(
        it.restore_state(&v("(None,)")),
        Err(Error::StateArity { given: 1, .. })
    ));
    assert!(matches!(
        it.restore_state(&v("(None, 'a')")),
        Err(Error::StateField { field: "timescurrent", .. })
    ));
    assert!(matches!(
        it.restore_state(&v("(None, -1)")),
        Err(Error::StateRange { .. })
    ));
    assert!(matches!(
        it.restore_state(&v("(1, 3)")),
        Err(Error::StateRange { .. })
    ));
    assert_eq!(drain(&mut it), ints(&[1, 1, 2, 2]));
}

#[test]
fn checkpoint_continues_independently() {
    let mut it = replicate(&range(4), 3).unwrap();
    it.advance().unwrap();
    it.advance().unwrap();
    assert_checkpoint_matches(it);
}

#[test]
fn duplicate_shares_the_source() {
    let mut it = replicate(&v("[1, 2]"), 2).unwrap();
    it.advance().unwrap();
    let mut dup = it.duplicate();
    assert_eq!(dup.advance().unwrap(), Some(Value::Int(1)));
    assert_eq!(dup.advance().unwrap(), Some(Value::Int(2)));
    // both copies had one repeat of `1` left, the source is now empty
    assert_eq!(drain(&mut it), ints(&[1]));
}
