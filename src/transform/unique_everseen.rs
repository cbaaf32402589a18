use tracing::debug;

use crate::error::Result;
use crate::func::UnaryFn;
use crate::seen::Seen;
use crate::source::{IterHandle, Source};
use crate::state::{Resumable, StateFields};
use crate::value::Value;

/// First occurrence of every item (or of every key, when a key function is
/// given), in order.
#[derive(Debug, Clone)]
pub struct UniqueEverseen {
    source: IterHandle,
    key: Option<UnaryFn>,
    seen: Seen,
}

impl UniqueEverseen {
    /// Deduplicate `source`, comparing `key(item)` when `key` is given.
    pub fn new(source: IterHandle, key: Option<UnaryFn>) -> Self {
        Self {
            source,
            key,
            seen: Seen::new(),
        }
    }

    /// Values (or keys) yielded so far.
    pub fn seen(&self) -> &Seen {
        &self.seen
    }

    /// Key function, if any.
    pub fn key(&self) -> Option<&UnaryFn> {
        self.key.as_ref()
    }
}

impl Source for UniqueEverseen {
    fn type_name(&self) -> &'static str {
        "unique_everseen"
    }

    fn advance(&mut self) -> Result<Option<Value>> {
        while let Some(item) = self.source.pull()? {
            let key = match &self.key {
                Some(key) => key.call(&item)?,
                None => item.clone(),
            };
            if !self.seen.contains_add(key)? {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }

    fn fork(&self) -> Result<Box<dyn Source>> {
        Ok(Box::new(self.checkpoint()?))
    }
}

impl Resumable for UniqueEverseen {
    fn capture_state(&self) -> Value {
        Value::tuple([Value::from(self.seen.clone())])
    }

    fn restore_state(&mut self, state: &Value) -> Result<()> {
        let fields = StateFields::parse("unique_everseen", state, 1..=1)?;
        let seen = fields.object::<Seen>(0, "seen", "Seen")?;
        self.seen = seen.clone();
        debug!(seen = self.seen.len(), "unique_everseen state restored");
        Ok(())
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }

    fn checkpoint(&self) -> Result<Self> {
        let mut copy = Self {
            source: self.source.fork()?,
            ..self.clone()
        };
        copy.restore_state(&self.capture_state())?;
        Ok(copy)
    }
}

crate::source::impl_iterator!(UniqueEverseen);
