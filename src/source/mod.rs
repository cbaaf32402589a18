//! Pull-based upstream sources.
//!
//! A [`Source`] yields `Result<Option<Value>>`: `Ok(Some)` for an item,
//! `Ok(None)` once exhausted, `Err` for a failure that must reach the caller
//! as-is. Sources are shared through [`IterHandle`], the value-level
//! iterator object.

mod sequence;

pub use sequence::{SeqIter, StrIter};

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::value::Value;

/// Upper bound on the capacity reserved from a length hint while collecting.
const PREALLOC_LIMIT: usize = 1 << 16;

/// A forward-only, fallible producer of values.
pub trait Source: fmt::Debug {
    /// Type name used in error messages.
    fn type_name(&self) -> &'static str;

    /// Pull the next item.
    fn advance(&mut self) -> Result<Option<Value>>;

    /// Estimated number of remaining items. Sources that cannot tell report
    /// zero. Hints above [`crate::hint::MAX_SIZE`] are rejected by consumers.
    fn length_hint(&self) -> Result<usize> {
        Ok(0)
    }

    /// Independent copy positioned where `self` stands.
    fn fork(&self) -> Result<Box<dyn Source>> {
        Err(Error::Type(format!(
            "cannot fork '{}' object",
            self.type_name()
        )))
    }

    /// Drain the remaining items. The length hint is consulted first, so a
    /// failing or overflowing hint fails the collection.
    fn collect_values(&mut self) -> Result<Vec<Value>> {
        let hint = crate::hint::checked(self.length_hint()?)?;
        let mut out = Vec::with_capacity(hint.min(PREALLOC_LIMIT));
        while let Some(item) = self.advance()? {
            out.push(item);
        }
        Ok(out)
    }
}

/// Shared handle to a boxed source; the iterator object of the value model.
///
/// Cloning the handle shares the underlying position.
#[derive(Clone)]
pub struct IterHandle(Rc<RefCell<Box<dyn Source>>>);

impl IterHandle {
    /// Wrap a source.
    pub fn new(source: impl Source + 'static) -> Self {
        Self::from_boxed(Box::new(source))
    }

    /// Wrap an already boxed source.
    pub fn from_boxed(source: Box<dyn Source>) -> Self {
        IterHandle(Rc::new(RefCell::new(source)))
    }

    /// Iterator over a list of values.
    pub fn from_values(values: Vec<Value>) -> Self {
        Self::new(SeqIter::new(Rc::from(values)))
    }

    fn busy() -> Error {
        Error::Value("iterator already executing".to_string())
    }

    /// Pull the next item from the shared source.
    pub fn pull(&self) -> Result<Option<Value>> {
        let mut inner = self.0.try_borrow_mut().map_err(|_| Self::busy())?;
        inner.advance()
    }

    /// Length hint of the shared source.
    pub fn length_hint(&self) -> Result<usize> {
        let inner = self.0.try_borrow().map_err(|_| Self::busy())?;
        inner.length_hint()
    }

    /// Independent handle over a fork of the shared source.
    pub fn fork(&self) -> Result<IterHandle> {
        let inner = self.0.try_borrow().map_err(|_| Self::busy())?;
        Ok(Self::from_boxed(inner.fork()?))
    }

    /// Type name of the shared source.
    pub fn type_name(&self) -> &'static str {
        self.0.try_borrow().map_or("iterator", |inner| inner.type_name())
    }

    /// Whether two handles share one source.
    pub fn ptr_eq(&self, other: &IterHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl fmt::Debug for IterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} object at {:#x}>", self.type_name(), self.addr())
    }
}

impl Source for IterHandle {
    fn type_name(&self) -> &'static str {
        IterHandle::type_name(self)
    }

    fn advance(&mut self) -> Result<Option<Value>> {
        self.pull()
    }

    fn length_hint(&self) -> Result<usize> {
        IterHandle::length_hint(self)
    }

    fn fork(&self) -> Result<Box<dyn Source>> {
        Ok(Box::new(IterHandle::fork(self)?))
    }
}

impl Iterator for IterHandle {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        self.pull().transpose()
    }
}

/// Implement `Iterator<Item = Result<Value>>` for sources.
macro_rules! impl_iterator {
    ($($ty:ty),* $(,)?) => {$(
        impl Iterator for $ty {
            type Item = $crate::error::Result<$crate::value::Value>;

            fn next(&mut self) -> Option<Self::Item> {
                $crate::source::Source::advance(self).transpose()
            }
        }
    )*};
}
pub(crate) use impl_iterator;
