//! The owned tag tree.
//!
//! [`OwnValue`] is one node; [`OwnList`] and [`OwnCompound`] are the two
//! containers. Trees are built by hand or by [`read_document`] /
//! [`read_value`] on top of an [`NbtReader`](crate::NbtReader). They are
//! written with [`write_document`] / [`write_value`], which
//! accept anything implementing the read-only [`ReadableValue`] view.

mod compound_own;
mod list_own;
mod number;
mod pretty;
mod read_write;
mod value_own;
mod view;

pub use compound_own::*;
pub use list_own::*;
pub use number::*;
pub use pretty::*;
pub use read_write::*;
pub use value_own::*;
pub use view::*;
