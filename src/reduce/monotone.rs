use crate::error::Result;
use crate::value::{CompareOp, Value};

/// Whether neighbouring items of `iterable` are ordered: `<=` by default,
/// `<` when `strict`, `>=`/`>` when `decreasing`. Stops at the first pair
/// that violates the order.
pub fn all_monotone(iterable: &Value, decreasing: bool, strict: bool) -> Result<bool> {
    let op = match (decreasing, strict) {
        (false, false) => CompareOp::Le,
        (false, true) => CompareOp::Lt,
        (true, false) => CompareOp::Ge,
        (true, true) => CompareOp::Gt,
    };
    let source = iterable.iter()?;
    let Some(mut last) = source.pull()? else {
        return Ok(true);
    };
    while let Some(item) = source.pull()? {
        if !last.rich_compare(&item, op)? {
            return Ok(false);
        }
        last = item;
    }
    Ok(true)
}
