//! Eager, single-pass reductions. They hold no resumable state; every
//! failure raised by the source or by a comparison ends the pass.

mod isinstance;
mod minmax;
mod monotone;

pub use isinstance::{all_isinstance, any_isinstance};
pub use minmax::{minmax, minmax_iter, MinMaxOptions};
pub use monotone::all_monotone;
