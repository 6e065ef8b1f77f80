//! Per-format primitive encodings: fixed-width numbers, VarInts and strings.

mod format;
pub mod mutf8;
pub mod varint;

pub use format::*;
