//! Minimum and maximum in one pass.
//!
//! The first item seeds both bounds. The remaining items are consumed in
//! pairs: the pair is ordered with one comparison, then its smaller member
//! challenges the minimum and its larger member challenges the maximum.
//! That costs about three comparisons per two items instead of four.
//! Ties always resolve to the earlier item, for both bounds.

use crate::error::{Error, Result};
use crate::func::UnaryFn;
use crate::source::IterHandle;
use crate::value::Value;

/// Key function and empty-input fallback of [`minmax`].
#[derive(Debug, Clone, Default)]
pub struct MinMaxOptions {
    /// Items are compared by `key(item)` when set.
    pub key: Option<UnaryFn>,
    /// Result for an empty iterable, returned as both bounds.
    pub default: Option<Value>,
}

impl MinMaxOptions {
    /// Compare by `key(item)`.
    pub fn with_key(mut self, key: UnaryFn) -> Self {
        self.key = Some(key);
        self
    }

    /// Fallback for an empty iterable.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Item together with the value it is compared by.
#[derive(Clone)]
struct Keyed {
    item: Value,
    key: Value,
}

impl Keyed {
    fn new(item: Value, key: Option<&UnaryFn>) -> Result<Self> {
        let key = match key {
            Some(key) => key.call(&item)?,
            None => item.clone(),
        };
        Ok(Self { item, key })
    }
}

/// `(min, max)` of a single iterable argument, or of two or more
/// positional arguments.
pub fn minmax(args: &[Value], options: MinMaxOptions) -> Result<(Value, Value)> {
    match args {
        [] => Err(Error::Type(
            "minmax expected at least 1 argument, got 0".to_string(),
        )),
        [iterable] => minmax_iter(iterable.iter()?, options),
        _ if options.default.is_some() => Err(Error::Type(
            "Cannot specify a default for `minmax` with multiple positional arguments"
                .to_string(),
        )),
        _ => minmax_iter(IterHandle::from_values(args.to_vec()), options),
    }
}

/// `(min, max)` of the items of `source`.
pub fn minmax_iter(source: IterHandle, options: MinMaxOptions) -> Result<(Value, Value)> {
    let key = options.key.as_ref();
    let Some(first) = source.pull()? else {
        return options.default.map(|d| (d.clone(), d)).ok_or_else(|| {
            Error::Value("`minmax` arg is an empty sequence".to_string())
        });
    };
    let mut lo = Keyed::new(first, key)?;
    let mut hi = lo.clone();

    while let Some(item) = source.pull()? {
        let one = Keyed::new(item, key)?;
        let Some(item) = source.pull()? else {
            if one.key.lt(&lo.key)? {
                lo = one.clone();
            }
            if one.key.gt(&hi.key)? {
                hi = one;
            }
            break;
        };
        let two = Keyed::new(item, key)?;
        let (small, big) = if two.key.lt(&one.key)? {
            (two, one)
        } else if two.key.gt(&one.key)? {
            (one, two)
        } else {
            (one.clone(), one)
        };
        if small.key.lt(&lo.key)? {
            lo = small;
        }
        if big.key.gt(&hi.key)? {
            hi = big;
        }
    }
    Ok((lo.item, hi.item))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: i64, b: i64) -> Value {
        Value::tuple([Value::Int(a), Value::Int(b)])
    }

    fn first_field() -> UnaryFn {
        UnaryFn::named("first", |x| match x {
            Value::Tuple(items) => Ok(items[0].clone()),
            other => Ok(other.clone()),
        })
    }

    #[test]
    fn positional_arguments_are_the_items() {
        let args = [4, 3, 2, 1].map(Value::Int);
        let (lo, hi) = minmax(&args, MinMaxOptions::default()).unwrap();
        assert_eq!((lo, hi), (Value::Int(1), Value::Int(4)));
    }

    #[test]
    fn ties_keep_the_first_item() {
        let args = [pair(5, 5), pair(1, 5), pair(1, 2), pair(1, 3)];
        let options = MinMaxOptions::default().with_key(first_field());
        let (lo, hi) = minmax(&args, options).unwrap();
        assert_eq!(lo, pair(1, 5));
        assert_eq!(hi, pair(5, 5));
    }

    #[test]
    fn empty_input_uses_the_default() {
        let empty = Value::list([]);
        let options = MinMaxOptions::default().with_default(10);
        assert_eq!(
            minmax(&[empty.clone()], options).unwrap(),
            (Value::Int(10), Value::Int(10))
        );
        assert!(matches!(
            minmax(&[empty], MinMaxOptions::default()),
            Err(Error::Value(_))
        ));
    }

    #[test]
    fn argument_shape_errors() {
        assert!(matches!(
            minmax(&[], MinMaxOptions::default()),
            Err(Error::Type(_))
        ));
        let options = MinMaxOptions::default().with_default(10);
        assert!(matches!(
            minmax(&[Value::Int(1), Value::Int(2)], options),
            Err(Error::Type(_))
        ));
    }
}
