//! Membership structure for possibly-unhashable values.
//!
//! Hashable values live in hash buckets keyed by their fallible hash;
//! values whose hash reports [`Error::Unhashable`](crate::error::Error::Unhashable) go to an ordered list
//! that is scanned linearly. Any other hashing failure, and any equality
//! failure on either path, propagates.

use std::any::Any;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::value::{Object, Value};

/// Hybrid hash-set plus fallback list.
#[derive(Debug, Clone, Default)]
pub struct Seen {
    buckets: HashMap<u64, Vec<Value>>,
    hashed: usize,
    unhashable: Vec<Value>,
}

enum Slot {
    Hashed(u64),
    Unhashable,
}

fn contains_eq(items: &[Value], x: &Value) -> Result<bool> {
    for item in items {
        if item.eq_value(x)? {
            return Ok(true);
        }
    }
    Ok(false)
}

impl Seen {
    /// Empty seen-set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seen-set pre-filled with `hashable` and `unhashable` values. The
    /// hashable ones must hash.
    pub fn from_parts(
        hashable: impl IntoIterator<Item = Value>,
        unhashable: impl IntoIterator<Item = Value>,
    ) -> Result<Self> {
        let mut seen = Self::new();
        for value in hashable {
            let hash = value.hash_value()?;
            seen.insert_hashed(hash, value)?;
        }
        for value in unhashable {
            if !contains_eq(&seen.unhashable, &value)? {
                seen.unhashable.push(value);
            }
        }
        Ok(seen)
    }

    fn slot(x: &Value) -> Result<Slot> {
        match x.hash_value() {
            Ok(hash) => Ok(Slot::Hashed(hash)),
            Err(err) if err.is_unhashable() => Ok(Slot::Unhashable),
            Err(err) => Err(err),
        }
    }

    fn insert_hashed(&mut self, hash: u64, x: Value) -> Result<bool> {
        let bucket = self.buckets.entry(hash).or_default();
        if contains_eq(bucket, &x)? {
            return Ok(false);
        }
        bucket.push(x);
        self.hashed += 1;
        Ok(true)
    }

    /// Whether `x` has been seen.
    pub fn contains(&self, x: &Value) -> Result<bool> {
        match Self::slot(x)? {
            Slot::Hashed(hash) => match self.buckets.get(&hash) {
                Some(bucket) => contains_eq(bucket, x),
                None => Ok(false),
            },
            Slot::Unhashable => contains_eq(&self.unhashable, x),
        }
    }

    /// Record `x`. Adding a value that is already present is a no-op.
    pub fn add(&mut self, x: Value) -> Result<()> {
        self.contains_add(x).map(|_| ())
    }

    /// Record `x` and report whether it had been seen before.
    pub fn contains_add(&mut self, x: Value) -> Result<bool> {
        match Self::slot(&x)? {
            Slot::Hashed(hash) => Ok(!self.insert_hashed(hash, x)?),
            Slot::Unhashable => {
                if contains_eq(&self.unhashable, &x)? {
                    return Ok(true);
                }
                self.unhashable.push(x);
                Ok(false)
            }
        }
    }

    /// Number of recorded values.
    pub fn len(&self) -> usize {
        self.hashed + self.unhashable.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Recorded unhashable values, in insertion order.
    pub fn unhashable(&self) -> &[Value] {
        &self.unhashable
    }

    /// Set equality of the hashed members plus multiset equality of the
    /// unhashable lists.
    pub fn equals(&self, other: &Seen) -> Result<bool> {
        if self.hashed != other.hashed || self.unhashable.len() != other.unhashable.len() {
            return Ok(false);
        }
        for (hash, bucket) in &self.buckets {
            let Some(theirs) = other.buckets.get(hash) else {
                return Ok(false);
            };
            for value in bucket {
                if !contains_eq(theirs, value)? {
                    return Ok(false);
                }
            }
        }
        let mut unmatched: Vec<&Value> = other.unhashable.iter().collect();
        for value in &self.unhashable {
            let mut found = None;
            for (idx, candidate) in unmatched.iter().enumerate() {
                if value.eq_value(candidate)? {
                    found = Some(idx);
                    break;
                }
            }
            match found {
                Some(idx) => {
                    unmatched.swap_remove(idx);
                }
                None => return Ok(false),
            }
        }
        Ok(true)
    }
}

impl Object for Seen {
    fn type_name(&self) -> &'static str {
        "Seen"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn hash_value(&self) -> Result<u64> {
        Err(Error::Unhashable("Seen".to_string()))
    }

    fn eq_value(&self, other: &Value) -> Result<bool> {
        match other.downcast_ref::<Seen>() {
            Some(other) => self.equals(other),
            None => Ok(false),
        }
    }
}

impl From<Seen> for Value {
    fn from(seen: Seen) -> Self {
        Value::object(seen)
    }
}
