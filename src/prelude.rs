//! Items used by almost every module of the crate.

pub use snafu::{ensure, OptionExt, ResultExt, Snafu};
