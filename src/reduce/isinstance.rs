use crate::error::Result;
use crate::func::TypeFilter;
use crate::value::Value;

/// Whether every item of `iterable` matches `types`. Stops at the first
/// mismatch.
pub fn all_isinstance(iterable: &Value, types: &TypeFilter) -> Result<bool> {
    let source = iterable.iter()?;
    while let Some(item) = source.pull()? {
        if !types.matches(&item)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Whether some item of `iterable` matches `types`. Stops at the first
/// match.
pub fn any_isinstance(iterable: &Value, types: &TypeFilter) -> Result<bool> {
    let source = iterable.iter()?;
    while let Some(item) = source.pull()? {
        if types.matches(&item)? {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Kind;

    #[test]
    fn empty_iterables_are_vacuous() {
        let empty = Value::list([]);
        let ints = TypeFilter::kind(Kind::Int);
        assert!(all_isinstance(&empty, &ints).unwrap());
        assert!(!any_isinstance(&empty, &ints).unwrap());
    }

    #[test]
    fn mixed_items() {
        let mixed = Value::list([Value::Int(1), Value::str("a")]);
        let ints = TypeFilter::kind(Kind::Int);
        assert!(!all_isinstance(&mixed, &ints).unwrap());
        assert!(any_isinstance(&mixed, &ints).unwrap());
    }
}
