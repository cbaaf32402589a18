//! Lazy transformation iterators.
//!
//! Each iterator wraps an upstream [`IterHandle`], pulls from it on demand
//! and implements [`Source`] (so transformations compose), [`Resumable`]
//! and `Iterator<Item = Result<Value>>`.
//!
//! [`Transform`] is the closed set of all transformations behind one
//! uniform interface.

mod accumulate;
mod applyfunc;
mod clamp;
mod deepflatten;
mod duplicates;
mod intersperse;
mod replicate;
mod successive;
mod unique_everseen;

pub use accumulate::Accumulate;
pub use applyfunc::ApplyFunc;
pub use clamp::{Clamp, ClampConfig};
pub use deepflatten::{DeepFlatten, DeepFlattenConfig, DEFAULT_RECURSION_LIMIT};
pub use duplicates::Duplicates;
pub use intersperse::Intersperse;
pub use replicate::Replicate;
pub use successive::Successive;
pub use unique_everseen::UniqueEverseen;

use crate::error::Result;
use crate::source::{IterHandle, Source};
use crate::state::Resumable;
use crate::value::Value;

/// Any transformation iterator.
#[derive(Debug, Clone)]
pub enum Transform {
    /// Running totals.
    Accumulate(Accumulate),
    /// Repeated function application.
    ApplyFunc(ApplyFunc),
    /// Bound filtering or clipping.
    Clamp(Clamp),
    /// Recursive flattening.
    DeepFlatten(DeepFlatten),
    /// Items already seen.
    Duplicates(Duplicates),
    /// Fill value between items.
    Intersperse(Intersperse),
    /// Every item repeated.
    Replicate(Replicate),
    /// Sliding windows.
    Successive(Successive),
    /// First occurrences only.
    UniqueEverseen(UniqueEverseen),
}

macro_rules! dispatch {
    ($self:expr, $it:ident => $body:expr) => {
        match $self {
            Transform::Accumulate($it) => $body,
            Transform::ApplyFunc($it) => $body,
            Transform::Clamp($it) => $body,
            Transform::DeepFlatten($it) => $body,
            Transform::Duplicates($it) => $body,
            Transform::Intersperse($it) => $body,
            Transform::Replicate($it) => $body,
            Transform::Successive($it) => $body,
            Transform::UniqueEverseen($it) => $body,
        }
    };
}

macro_rules! rewrap {
    ($self:expr, $it:ident => $body:expr) => {
        match $self {
            Transform::Accumulate($it) => Transform::Accumulate($body),
            Transform::ApplyFunc($it) => Transform::ApplyFunc($body),
            Transform::Clamp($it) => Transform::Clamp($body),
            Transform::DeepFlatten($it) => Transform::DeepFlatten($body),
            Transform::Duplicates($it) => Transform::Duplicates($body),
            Transform::Intersperse($it) => Transform::Intersperse($body),
            Transform::Replicate($it) => Transform::Replicate($body),
            Transform::Successive($it) => Transform::Successive($body),
            Transform::UniqueEverseen($it) => Transform::UniqueEverseen($body),
        }
    };
}

impl Transform {
    /// Wrap the transformation in a value-level iterator handle.
    pub fn into_handle(self) -> IterHandle {
        IterHandle::new(self)
    }
}

impl Source for Transform {
    fn type_name(&self) -> &'static str {
        dispatch!(self, it => it.type_name())
    }

    fn advance(&mut self) -> Result<Option<Value>> {
        dispatch!(self, it => it.advance())
    }

    fn length_hint(&self) -> Result<usize> {
        dispatch!(self, it => it.length_hint())
    }

    fn fork(&self) -> Result<Box<dyn Source>> {
        Ok(Box::new(self.checkpoint()?))
    }
}

impl Resumable for Transform {
    fn capture_state(&self) -> Value {
        dispatch!(self, it => it.capture_state())
    }

    fn restore_state(&mut self, state: &Value) -> Result<()> {
        dispatch!(self, it => it.restore_state(state))
    }

    fn duplicate(&self) -> Self {
        rewrap!(self, it => it.duplicate())
    }

    fn checkpoint(&self) -> Result<Self> {
        Ok(rewrap!(self, it => it.checkpoint()?))
    }
}

macro_rules! impl_from {
    ($($variant:ident),* $(,)?) => {$(
        impl From<$variant> for Transform {
            fn from(it: $variant) -> Self {
                Transform::$variant(it)
            }
        }
    )*};
}

impl_from!(
    Accumulate,
    ApplyFunc,
    Clamp,
    DeepFlatten,
    Duplicates,
    Intersperse,
    Replicate,
    Successive,
    UniqueEverseen,
);

crate::source::impl_iterator!(Transform);
