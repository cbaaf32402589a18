use std::rc::Rc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::hint;
use crate::source::{IterHandle, Source};
use crate::state::{Resumable, StateFields};
use crate::value::Value;

/// Sliding windows of `times` consecutive items, yielded as tuples.
#[derive(Debug, Clone)]
pub struct Successive {
    source: IterHandle,
    times: usize,
    window: Option<Rc<[Value]>>,
}

impl Successive {
    /// Windows of width `times` over `source`; `times` must be positive.
    pub fn new(source: IterHandle, times: usize) -> Result<Self> {
        if times == 0 {
            debug!("successive rejected a zero window width");
            return Err(Error::Config(
                "`times` argument for `successive` must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            source,
            times,
            window: None,
        })
    }

    /// Window width.
    pub fn times(&self) -> usize {
        self.times
    }

    fn fill_first(&mut self) -> Result<Option<Rc<[Value]>>> {
        let mut items = Vec::with_capacity(self.times);
        while items.len() < self.times {
            match self.source.pull()? {
                Some(item) => items.push(item),
                None => return Ok(None),
            }
        }
        Ok(Some(Rc::from(items)))
    }
}

impl Source for Successive {
    fn type_name(&self) -> &'static str {
        "successive"
    }

    fn advance(&mut self) -> Result<Option<Value>> {
        let next = match self.window.clone() {
            None => self.fill_first()?,
            Some(window) => self
                .source
                .pull()?
                .map(|item| window[1..].iter().cloned().chain([item]).collect()),
        };
        let Some(window) = next else {
            return Ok(None);
        };
        self.window = Some(Rc::clone(&window));
        Ok(Some(Value::Tuple(window)))
    }

    fn length_hint(&self) -> Result<usize> {
        let n = hint::upstream(&self.source)?;
        match self.window {
            Some(_) => Ok(n),
            None if self.times > n => Ok(0),
            None => Ok(n - (self.times - 1)),
        }
    }

    fn fork(&self) -> Result<Box<dyn Source>> {
        Ok(Box::new(self.checkpoint()?))
    }
}

impl Resumable for Successive {
    fn capture_state(&self) -> Value {
        let window = self.window.clone().map(Value::Tuple);
        Value::tuple([Value::from(window)])
    }

    fn restore_state(&mut self, state: &Value) -> Result<()> {
        let fields = StateFields::parse("successive", state, 1..=1)?;
        let window = match fields.value(0)? {
            Value::None => None,
            _ => {
                let window = fields.tuple(0, "window")?;
                if window.len() != self.times {
                    return Err(fields.range_error(format!(
                        "`window` must hold {} items, got {}",
                        self.times,
                        window.len()
                    )));
                }
                Some(Rc::clone(window))
            }
        };
        self.window = window;
        debug!(filled = self.window.is_some(), "successive state restored");
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

crate::source::impl_iterator!(Successive);
