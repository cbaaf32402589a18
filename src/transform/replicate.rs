use tracing::debug;

use crate::error::{Error, Result};
use crate::hint;
use crate::source::{IterHandle, Source};
use crate::state::{Resumable, StateFields};
use crate::value::Value;

/// Every source item repeated `times` times in a row.
#[derive(Debug, Clone)]
pub struct Replicate {
    source: IterHandle,
    times: usize,
    current: Option<Value>,
    timescurrent: usize,
}

impl Replicate {
    /// Repeat each item of `source`; `times` must be greater than one.
    pub fn new(source: IterHandle, times: usize) -> Result<Self> {
        if times <= 1 {
            debug!(times, "replicate rejected its repeat count");
            return Err(Error::Config(
                "`times` argument for `replicate` must be greater than 1".to_string(),
            ));
        }
        Ok(Self {
            source,
            times,
            current: None,
            timescurrent: 0,
        })
    }

    /// Repeat count.
    pub fn times(&self) -> usize {
        self.times
    }

    /// How often the current item has been yielded.
    pub fn timescurrent(&self) -> usize {
        self.timescurrent
    }

    /// Item being repeated, `None` before the first pull.
    pub fn current(&self) -> Option<&Value> {
        self.current.as_ref()
    }
}

impl Source for Replicate {
    fn type_name(&self) -> &'static str {
        "replicate"
    }

    fn advance(&mut self) -> Result<Option<Value>> {
        if let Some(current) = &self.current {
            if self.timescurrent < self.times {
                self.timescurrent += 1;
                return Ok(Some(current.clone()));
            }
        }
        let Some(item) = self.source.pull()? else {
            return Ok(None);
        };
        self.current = Some(item.clone());
        self.timescurrent = 1;
        Ok(Some(item))
    }

    fn length_hint(&self) -> Result<usize> {
        let total = hint::mul(hint::upstream(&self.source)?, self.times)?;
        if self.current.is_some() {
            hint::add(total, self.times - self.timescurrent)
        } else {
            Ok(total)
        }
    }

    fn fork(&self) -> Result<Box<dyn Source>> {
        Ok(Box::new(self.checkpoint()?))
    }
}

impl Resumable for Replicate {
    fn capture_state(&self) -> Value {
        Value::tuple([
            self.current.clone().unwrap_or_default(),
            Value::Int(self.timescurrent as i64),
        ])
    }

    fn restore_state(&mut self, state: &Value) -> Result<()> {
        let fields = StateFields::parse("replicate", state, 2..=2)?;
        let current = fields.value(0)?;
        let timescurrent = fields.int(1, "timescurrent")?;
        if timescurrent < 0 || timescurrent as u64 > self.times as u64 {
            return Err(fields.range_error(format!(
                "`timescurrent` must be in [0, {}], got {timescurrent}",
                self.times
            )));
        }
        self.timescurrent = timescurrent as usize;
        self.current = (self.timescurrent > 0).then(|| current.clone());
        debug!(timescurrent = self.timescurrent, "replicate state restored");
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

crate::source::impl_iterator!(Replicate);
