//! Error taxonomy shared by every iterator and reducer.
//!
//! Failures raised by upstream sources, caller-supplied functions and value
//! comparisons travel through the engine untouched. The engine's own
//! failures (configuration, snapshot validation, overflow, recursion) get
//! dedicated variants.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced or propagated by the iterator engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid construction argument (non-positive window, repeat count, ...).
    #[error("ValueError: {0}")]
    Config(String),

    /// Operation not supported for the involved value kinds.
    #[error("TypeError: {0}")]
    Type(String),

    /// Operation received a value of the right kind but the wrong content.
    #[error("ValueError: {0}")]
    Value(String),

    /// Hashing was attempted on a value that has no hash.
    #[error("TypeError: unhashable type: '{0}'")]
    Unhashable(String),

    /// Failure raised by caller code, carried with its own kind name.
    #[error("{kind}: {message}")]
    Raised {
        /// Exception-style kind name, e.g. `ValueError`.
        kind: String,
        /// Message supplied by the raiser.
        message: String,
    },

    /// Snapshot is not a tuple.
    #[error("TypeError: `{owner}.restore_state` expected a `tuple`-like argument, got `{got}` instead")]
    StateShape {
        /// Iterator that rejected the snapshot.
        owner: &'static str,
        /// Kind name of the rejected snapshot.
        got: &'static str,
    },

    /// Snapshot tuple has the wrong number of fields.
    #[error("TypeError: `{owner}.restore_state` expected {expected} items in the state, {given} given")]
    StateArity {
        /// Iterator that rejected the snapshot.
        owner: &'static str,
        /// Human readable accepted arity, e.g. `1 to 2`.
        expected: String,
        /// Number of fields supplied.
        given: usize,
    },

    /// A snapshot field has the wrong kind.
    #[error("TypeError: `{owner}.restore_state` expected `{expected}` for `{field}`, got `{got}` instead")]
    StateField {
        /// Iterator that rejected the snapshot.
        owner: &'static str,
        /// Name of the offending field.
        field: &'static str,
        /// Expected kind name.
        expected: &'static str,
        /// Kind name that was supplied.
        got: &'static str,
    },

    /// A snapshot field violates a range or consistency rule.
    #[error("ValueError: `{owner}.restore_state` {message}")]
    StateRange {
        /// Iterator that rejected the snapshot.
        owner: &'static str,
        /// Description of the violated rule.
        message: String,
    },

    /// Size arithmetic exceeded the platform maximum.
    #[error("OverflowError: {0}")]
    Overflow(String),

    /// Nesting exceeded the recursion ceiling.
    #[error("RecursionError: maximum recursion depth exceeded ({limit} levels)")]
    Recursion {
        /// Ceiling that was exceeded.
        limit: usize,
    },
}

impl Error {
    /// Error raised by caller code with an arbitrary kind name.
    pub fn raised(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Raised {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Whether this error is the "value has no hash" signal the seen-set
    /// recovers from.
    pub fn is_unhashable(&self) -> bool {
        matches!(self, Error::Unhashable(_))
    }

    /// Exception-style kind name of the error.
    pub fn kind(&self) -> &str {
        match self {
            Error::Config(_) | Error::Value(_) | Error::StateRange { .. } => "ValueError",
            Error::Type(_)
            | Error::Unhashable(_)
            | Error::StateShape { .. }
            | Error::StateArity { .. }
            | Error::StateField { .. } => "TypeError",
            Error::Raised { kind, .. } => kind,
            Error::Overflow(_) => "OverflowError",
            Error::Recursion { .. } => "RecursionError",
        }
    }

    /// Shorthand for the overflow raised by size arithmetic.
    pub(crate) fn size_overflow() -> Self {
        Error::Overflow("cannot fit length hint into an index-sized integer".to_string())
    }
}
