//! # iterkit: resumable lazy iterator transformations
//!
//! Pull-based transformations over dynamically typed [`Value`]s. Every
//! transformation shares one contract:
//!
//! 1. **Lazy pulling**: nothing happens until the consumer asks for the next
//!    item; once exhausted an iterator stays exhausted
//! 2. **Length hints**: a fallible, overflow-checked estimate of the items
//!    left, composed from the upstream's own hint
//! 3. **Snapshots**: the progress can be captured as a tuple and restored,
//!    with malformed snapshots rejected before anything changes
//! 4. **Copies**: a shallow `duplicate` sharing the upstream, and a deep
//!    `checkpoint` forking it
//!
//! Failures raised by the upstream, by caller functions or by the values
//! themselves reach the caller unchanged.
//!
//! ## Usage Example
//!
//! ```
//! use iterkit::{replicate, Resumable, Source, Value};
//!
//! let source: Value = "[1, 2]".parse()?;
//! let mut it = replicate(&source, 2)?;
//! assert_eq!(it.length_hint()?, 4);
//! assert_eq!(it.advance()?, Some(Value::Int(1)));
//!
//! let state = it.capture_state();
//! let rest = it.collect_values()?;
//! assert_eq!(rest.len(), 3);
//!
//! let mut again = replicate(&source, 2)?;
//! again.restore_state(&state)?;
//! # Ok::<(), iterkit::Error>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod error;      // Error taxonomy
pub mod value;      // Dynamic value model
pub mod func;       // Caller-supplied callables
pub mod source;     // Upstream sources and iterator handles
pub mod hint;       // Length-hint arithmetic
pub mod state;      // Snapshot/restore protocol
pub mod seen;       // Seen-set
pub mod transform;  // Transformation iterators
pub mod reduce;     // Eager reducers

pub use error::{Error, Result};
pub use func::{BinaryFn, TypeFilter, UnaryFn};
pub use reduce::{all_isinstance, all_monotone, any_isinstance, minmax, minmax_iter, MinMaxOptions};
pub use seen::Seen;
pub use source::{IterHandle, Source};
pub use state::Resumable;
pub use transform::{
    Accumulate, ApplyFunc, Clamp, ClampConfig, DeepFlatten, DeepFlattenConfig, Duplicates,
    Intersperse, Replicate, Successive, Transform, UniqueEverseen,
};
pub use value::{CompareOp, Kind, Object, Value};

/// Running totals of `iterable`, combined with `func` (addition when
/// `None`) and seeded with `initial` when given.
pub fn accumulate(
    iterable: &Value,
    func: Option<BinaryFn>,
    initial: Option<Value>,
) -> Result<Accumulate> {
    let mut it = Accumulate::new(iterable.iter()?);
    if let Some(func) = func {
        it = it.with_func(func);
    }
    if let Some(initial) = initial {
        it = it.with_initial(initial);
    }
    Ok(it)
}

/// `func(initial)`, `func(func(initial))`, ... without end.
pub fn applyfunc(func: UnaryFn, initial: Value) -> ApplyFunc {
    ApplyFunc::new(func, initial)
}

/// Items of `iterable` restricted to the bounds in `config`.
pub fn clamp(iterable: &Value, config: ClampConfig) -> Result<Clamp> {
    Ok(Clamp::new(iterable.iter()?, config))
}

/// Leaves of the nested `iterable`.
pub fn deepflatten(iterable: &Value, config: DeepFlattenConfig) -> Result<DeepFlatten> {
    DeepFlatten::new(iterable.iter()?, config)
}

/// Items of `iterable` that occurred before.
pub fn duplicates(iterable: &Value, key: Option<UnaryFn>) -> Result<Duplicates> {
    Ok(Duplicates::new(iterable.iter()?, key))
}

/// Items of `iterable` separated by `fill`.
pub fn intersperse(iterable: &Value, fill: Value) -> Result<Intersperse> {
    Ok(Intersperse::new(iterable.iter()?, fill))
}

/// Every item of `iterable` repeated `times` (> 1) times.
pub fn replicate(iterable: &Value, times: usize) -> Result<Replicate> {
    Replicate::new(iterable.iter()?, times)
}

/// Windows of `times` (> 0) consecutive items of `iterable`.
pub fn successive(iterable: &Value, times: usize) -> Result<Successive> {
    Successive::new(iterable.iter()?, times)
}

/// First occurrence of every item of `iterable`.
pub fn unique_everseen(iterable: &Value, key: Option<UnaryFn>) -> Result<UniqueEverseen> {
    Ok(UniqueEverseen::new(iterable.iter()?, key))
}
