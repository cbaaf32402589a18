mod common;

use common::*;
use iterkit::{applyfunc, Error, Resumable, Source, UnaryFn, Value};

fn square() -> UnaryFn {
    UnaryFn::named("square", |x| x.mul(x))
}

#[test]
fn yields_successive_applications() {
    let it = applyfunc(square(), Value::Int(2));
    let out: Vec<Value> = it.take(3).map(|r| r.unwrap()).collect();
    assert_eq!(out, ints(&[4, 16, 256]));
}

#[test]
fn never_exhausts_and_hints_zero() {
    let mut it = applyfunc(UnaryFn::new(|x| Ok(x.clone())), Value::Int(7));
    assert_eq!(it.length_hint().unwrap(), 0);
    for _ in 0..100 {
        assert_eq!(it.advance().unwrap(), Some(Value::Int(7)));
    }
}

#[test]
fn function_failures_propagate() {
    let mut it = applyfunc(square(), Value::str("a"));
    assert!(matches!(it.advance(), Err(Error::Type(_))));
}

#[test]
fn accessors() {
    let mut it = applyfunc(square(), Value::Int(3));
    assert_eq!(it.func().name(), "square");
    assert_eq!(it.current(), &Value::Int(3));
    it.advance().unwrap();
    assert_eq!(it.current(), &Value::Int(9));
}

#[test]
fn snapshot_restarts_the_chain() {
    let mut it = applyfunc(square(), Value::Int(2));
    it.advance().unwrap();
    let state = it.capture_state();
    assert_eq!(state, v("(4,)"));
    assert_eq!(it.advance().unwrap(), Some(Value::Int(16)));
    it.restore_state(&state).unwrap();
    assert_eq!(it.advance().unwrap(), Some(Value::Int(16)));
}

#[test]
fn snapshot_requires_exactly_one_field() {
    let mut it = applyfunc(square(), Value::Int(2));
    let err = it.restore_state(&v("()")).unwrap_err();
    assert!(err.to_string().contains("0 given"), "{err}");
    assert!(it.restore_state(&v("[1]")).is_err());
    assert_eq!(it.current(), &Value::Int(2));
}

#[test]
fn checkpoint_is_independent() {
    let mut it = applyfunc(square(), Value::Int(2));
    it.advance().unwrap();
    let mut copy = it.checkpoint().unwrap();
    assert_eq!(copy.advance().unwrap(), Some(Value::Int(16)));
    assert_eq!(it.advance().unwrap(), Some(Value::Int(16)));
    let mut dup = it.duplicate();
    assert_eq!(dup.advance().unwrap(), Some(Value::Int(256)));
}
