use crate::error::Result;
use crate::hint;
use crate::source::{IterHandle, Source};
use crate::state::{Resumable, StateFields};
use crate::value::Value;

/// Bounds and mode of a [`Clamp`].
#[derive(Debug, Clone)]
pub struct ClampConfig {
    /// Lower bound, unbounded when `None`.
    pub low: Option<Value>,
    /// Upper bound, unbounded when `None`.
    pub high: Option<Value>,
    /// When removing, also drop items equal to a bound.
    pub inclusive: bool,
    /// Drop out-of-range items (`true`) or replace them by the nearest
    /// bound (`false`).
    pub remove: bool,
}

impl Default for ClampConfig {
    fn default() -> Self {
        Self {
            low: None,
            high: None,
            inclusive: false,
            remove: true,
        }
    }
}

impl ClampConfig {
    /// Set the lower bound.
    pub fn with_low(mut self, low: impl Into<Value>) -> Self {
        self.low = Some(low.into());
        self
    }

    /// Set the upper bound.
    pub fn with_high(mut self, high: impl Into<Value>) -> Self {
        self.high = Some(high.into());
        self
    }

    /// Exclude the bounds themselves when removing.
    pub fn with_inclusive(mut self, inclusive: bool) -> Self {
        self.inclusive = inclusive;
        self
    }

    /// Choose between removing and clipping.
    pub fn with_remove(mut self, remove: bool) -> Self {
        self.remove = remove;
        self
    }

    fn is_unbounded(&self) -> bool {
        self.low.is_none() && self.high.is_none()
    }
}

/// Items restricted to a range, either filtered or clipped.
#[derive(Debug, Clone)]
pub struct Clamp {
    source: IterHandle,
    config: ClampConfig,
}

impl Clamp {
    /// Clamp `source` according to `config`.
    pub fn new(source: IterHandle, config: ClampConfig) -> Self {
        Self { source, config }
    }

    /// Active bounds and mode.
    pub fn config(&self) -> &ClampConfig {
        &self.config
    }

    fn below(&self, item: &Value, low: &Value) -> Result<bool> {
        if self.config.remove && self.config.inclusive {
            item.le(low)
        } else {
            item.lt(low)
        }
    }

    fn above(&self, item: &Value, high: &Value) -> Result<bool> {
        if self.config.remove && self.config.inclusive {
            item.ge(high)
        } else {
            item.gt(high)
        }
    }
}

impl Source for Clamp {
    fn type_name(&self) -> &'static str {
        "clamp"
    }

    fn advance(&mut self) -> Result<Option<Value>> {
        while let Some(item) = self.source.pull()? {
            if let Some(low) = &self.config.low {
                if self.below(&item, low)? {
                    if self.config.remove {
                        continue;
                    }
                    return Ok(Some(low.clone()));
                }
            }
            if let Some(high) = &self.config.high {
                if self.above(&item, high)? {
                    if self.config.remove {
                        continue;
                    }
                    return Ok(Some(high.clone()));
                }
            }
            return Ok(Some(item));
        }
        Ok(None)
    }

    fn length_hint(&self) -> Result<usize> {
        if !self.config.remove || self.config.is_unbounded() {
            hint::upstream(&self.source)
        } else {
            Ok(0)
        }
    }

    fn fork(&self) -> Result<Box<dyn Source>> {
        Ok(Box::new(self.checkpoint()?))
    }
}

impl Resumable for Clamp {
    fn capture_state(&self) -> Value {
        Value::tuple([])
    }

    fn restore_state(&mut self, state: &Value) -> Result<()> {
        StateFields::parse("clamp", state, 0..=0)?;
        Ok(())
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }

    fn checkpoint(&self) -> Result<Self> {
        Ok(Self {
            source: self.source.fork()?,
            config: self.config.clone(),
        })
    }
}

crate::source::impl_iterator!(Clamp);
