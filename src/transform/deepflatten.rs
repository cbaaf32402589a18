//! Recursive flattening of nested iterables.
//!
//! The iterator keeps an explicit stack of frames, one per nesting level
//! currently being walked. Frame `d` yields the items found at depth `d`;
//! an item is descended into by pushing its iterator as frame `d + 1`.
//! The stack height is bounded by a recursion ceiling so that values whose
//! iteration yields values of the same kind fail instead of looping.

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::func::TypeFilter;
use crate::source::{IterHandle, Source};
use crate::state::{Resumable, StateFields};
use crate::value::Value;

/// Default ceiling on the number of simultaneously open frames.
pub const DEFAULT_RECURSION_LIMIT: usize = 1000;

/// Depth limit and type filters of a [`DeepFlatten`].
#[derive(Debug, Clone)]
pub struct DeepFlattenConfig {
    /// Items at depth `d` are descended into only if `d < max_depth`.
    /// `None` flattens completely.
    pub max_depth: Option<usize>,
    /// Only items matching this filter are descended into.
    pub types: Option<TypeFilter>,
    /// Items matching this filter are never descended into.
    pub ignore: Option<TypeFilter>,
    /// Maximum number of open frames.
    pub recursion_limit: usize,
}

impl Default for DeepFlattenConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            types: None,
            ignore: None,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }
}

impl DeepFlattenConfig {
    /// Limit the flattening depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Restrict descent to matching items.
    pub fn with_types(mut self, types: TypeFilter) -> Self {
        self.types = Some(types);
        self
    }

    /// Never descend into matching items.
    pub fn with_ignore(mut self, ignore: TypeFilter) -> Self {
        self.ignore = Some(ignore);
        self
    }

    /// Override the frame ceiling.
    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.recursion_limit == 0 {
            debug!("deepflatten rejected a zero recursion limit");
            return Err(Error::Config(
                "`recursion_limit` argument for `deepflatten` must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Leaves of a nested structure, in depth-first order.
#[derive(Debug, Clone)]
pub struct DeepFlatten {
    frames: Vec<IterHandle>,
    config: DeepFlattenConfig,
}

impl DeepFlatten {
    /// Flatten `source` according to `config`.
    pub fn new(source: IterHandle, config: DeepFlattenConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            frames: vec![source],
            config,
        })
    }

    /// Active depth limit and filters.
    pub fn config(&self) -> &DeepFlattenConfig {
        &self.config
    }

    /// Index of the innermost open frame; `-1` once everything is exhausted.
    pub fn currentdepth(&self) -> isize {
        self.frames.len() as isize - 1
    }

    /// Iterator to descend into for `item` found at `depth`, or `None` when
    /// the item is a leaf.
    fn descend(&self, item: &Value, depth: usize) -> Result<Option<IterHandle>> {
        if self.config.max_depth.is_some_and(|max| depth >= max) {
            return Ok(None);
        }
        if let Some(ignore) = &self.config.ignore {
            if ignore.matches(item)? {
                return Ok(None);
            }
        }
        match &self.config.types {
            None if item.is_atomic_str() => Ok(None),
            None => item.try_iter(),
            Some(types) => {
                if !types.matches(item)? || item.is_atomic_str() {
                    return Ok(None);
                }
                item.iter().map(Some)
            }
        }
    }
}

impl Source for DeepFlatten {
    fn type_name(&self) -> &'static str {
        "deepflatten"
    }

    fn advance(&mut self) -> Result<Option<Value>> {
        loop {
            let Some(top) = self.frames.last() else {
                return Ok(None);
            };
            let depth = self.frames.len() - 1;
            let Some(item) = top.pull()? else {
                self.frames.pop();
                trace!(depth, "deepflatten frame exhausted");
                continue;
            };
            let Some(child) = self.descend(&item, depth)? else {
                return Ok(Some(item));
            };
            if self.frames.len() >= self.config.recursion_limit {
                return Err(Error::Recursion {
                    limit: self.config.recursion_limit,
                });
            }
            trace!(depth = depth + 1, "deepflatten frame pushed");
            self.frames.push(child);
        }
    }

    fn fork(&self) -> Result<Box<dyn Source>> {
        Ok(Box::new(self.checkpoint()?))
    }
}

impl Resumable for DeepFlatten {
    fn capture_state(&self) -> Value {
        let frames = self.frames.iter().map(detach).map(Value::Iter).collect();
        Value::tuple([
            Value::List(frames),
            Value::Int(self.currentdepth() as i64),
        ])
    }

    fn restore_state(&mut self, state: &Value) -> Result<()> {
        let fields = StateFields::parse("deepflatten", state, 2..=2)?;
        let frames = fields.list(0, "frames")?;
        let depth = fields.int(1, "currentdepth")?;
        if depth < -1 || depth >= frames.len() as i64 {
            return Err(fields.range_error(format!(
                "`currentdepth` must be in [-1, {}), got {depth}",
                frames.len()
            )));
        }
        if let Some(max) = self.config.max_depth {
            if depth > max as i64 {
                return Err(fields.range_error(format!(
                    "`currentdepth` must not exceed the depth limit {max}, got {depth}"
                )));
            }
        }
        if depth + 1 > self.config.recursion_limit as i64 {
            return Err(fields.range_error(format!(
                "`currentdepth` {depth} exceeds the recursion limit {}",
                self.config.recursion_limit
            )));
        }
        let open = (depth + 1) as usize;
        let mut restored = Vec::with_capacity(open);
        for frame in &frames[..open] {
            match frame {
                Value::Iter(handle) => restored.push(detach(handle)),
                other => return Err(fields.field_error("frames", "iterator", other)),
            }
        }
        self.frames = restored;
        debug!(currentdepth = depth, "deepflatten state restored");
        Ok(())
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }

    fn checkpoint(&self) -> Result<Self> {
        let frames = self
            .frames
            .iter()
            .map(IterHandle::fork)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            frames,
            config: self.config.clone(),
        })
    }
}

/// Fork of `handle` so that later pulls on either side stay apart. Sources
/// that cannot fork are shared.
fn detach(handle: &IterHandle) -> IterHandle {
    handle.fork().unwrap_or_else(|_| handle.clone())
}

crate::source::impl_iterator!(DeepFlatten);
