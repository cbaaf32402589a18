//! Length-hint arithmetic.
//!
//! Hints are bounded by [`MAX_SIZE`], the largest signed size the platform
//! can represent. Every step of a hint computation goes through the checked
//! helpers here so that an oversized intermediate fails with an overflow
//! error instead of wrapping.

use crate::error::{Error, Result};
use crate::source::IterHandle;

/// Largest representable size.
pub const MAX_SIZE: usize = isize::MAX as usize;

/// Reject hints above [`MAX_SIZE`].
pub fn checked(n: usize) -> Result<usize> {
    if n > MAX_SIZE {
        Err(Error::size_overflow())
    } else {
        Ok(n)
    }
}

/// Hint of an upstream source, validated against [`MAX_SIZE`]. A failing
/// upstream hint is returned unchanged.
pub fn upstream(source: &IterHandle) -> Result<usize> {
    checked(source.length_hint()?)
}

/// `a + b`, bounded by [`MAX_SIZE`].
pub fn add(a: usize, b: usize) -> Result<usize> {
    a.checked_add(b)
        .ok_or_else(Error::size_overflow)
        .and_then(checked)
}

/// `a * b`, bounded by [`MAX_SIZE`].
pub fn mul(a: usize, b: usize) -> Result<usize> {
    a.checked_mul(b)
        .ok_or_else(Error::size_overflow)
        .and_then(checked)
}
