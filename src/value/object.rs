use std::any::Any;
use std::fmt;

use crate::error::{Error, Result};
use crate::source::IterHandle;

use super::{CompareOp, Value};

/// Behaviour of a caller-defined value type.
///
/// Every hook has a default matching a plain object: identity hash, identity
/// equality, no ordering, not iterable. Implementors override the hooks they
/// need, and may fail from any of them. A type that overrides
/// [`Object::eq_value`] must override [`Object::hash_value`] as well, either
/// with a hash that agrees with its equality or with [`Error::Unhashable`].
pub trait Object: fmt::Debug {
    /// Type name used in error messages and type filters.
    fn type_name(&self) -> &'static str;

    /// Access for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Hash of the object. Return [`Error::Unhashable`] for objects that
    /// cannot be hashed.
    fn hash_value(&self) -> Result<u64> {
        Ok((self as *const Self).cast::<()>() as usize as u64)
    }

    /// Equality against another value. Identity has already been checked
    /// by the caller.
    fn eq_value(&self, _other: &Value) -> Result<bool> {
        Ok(false)
    }

    /// Ordering against another value, with `self` on the left.
    fn compare(&self, other: &Value, op: CompareOp) -> Result<bool> {
        Err(Error::Type(format!(
            "'{}' not supported between instances of '{}' and '{}'",
            op.symbol(),
            self.type_name(),
            other.type_name()
        )))
    }

    /// Iterator over the object, or `None` if it is not iterable.
    fn iter(&self) -> Result<Option<IterHandle>> {
        Ok(None)
    }
}
