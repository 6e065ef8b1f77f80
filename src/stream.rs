//! The pull reader and the push writer.

mod reader;
mod writer;

pub use reader::*;
pub use writer::*;
