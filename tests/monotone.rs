mod common;

use common::*;
use iterkit::{all_monotone, Error, Value};
use test_case::test_case;

#[test_case("[]", false, false, true ; "empty")]
#[test_case("[1]", true, true, true ; "single item")]
#[test_case("[1, 1, 2, 3]", false, false, true ; "non decreasing")]
#[test_case("[1, 1, 2, 3]", false, true, false ; "strictly increasing with repeat")]
#[test_case("[1, 2, 3]", false, true, true ; "strictly increasing")]
#[test_case("[3, 3, 2, 1]", true, false, true ; "non increasing")]
#[test_case("[3, 3, 2, 1]", true, true, false ; "strictly decreasing with repeat")]
#[test_case("[3, 2, 1]", true, true, true ; "strictly decreasing")]
#[test_case("[1, 3, 2]", false, false, false ; "unordered")]
#[test_case("'abc'", false, true, true ; "characters")]
fn orderings(literal: &str, decreasing: bool, strict: bool, expected: bool) {
    assert_eq!(all_monotone(&v(literal), decreasing, strict).unwrap(), expected);
}

#[test]
fn stops_at_the_first_violation() {
    // the incomparable tail is never reached
    assert!(!all_monotone(&v("[2, 1, 'a']"), false, false).unwrap());
}

#[test]
fn incomparable_neighbours_fail() {
    assert!(matches!(
        all_monotone(&v("[1, 'a']"), false, false),
        Err(Error::Type(_))
    ));
}

#[test]
fn failures_propagate() {
    assert_eq!(all_monotone(&fail_next(2), false, false).unwrap_err(), next_failed());
    assert_eq!(all_monotone(&fail_iter(), false, false).unwrap_err(), iter_failed());
    assert!(matches!(
        all_monotone(&Value::Int(1), false, false),
        Err(Error::Type(_))
    ));
}

#[test]
fn comparison_failures_propagate() {
    let items = Value::list([Value::object(LtButNoGt(2)), Value::object(LtButNoGt(1))]);
    assert_eq!(
        all_monotone(&items, true, false).unwrap_err(),
        Error::raised("ValueError", "no gt!")
    );
    assert!(!all_monotone(&items, false, true).unwrap());
}
