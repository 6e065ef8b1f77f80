//! Streaming codec for NBT (Named Binary Tag) in its three wire variants:
//! Java Edition (big-endian), Bedrock Edition files (little-endian) and the
//! Bedrock network encoding (little-endian with ZigZag VarInts).
//!
//! The core is a pair of cursors. [`NbtReader`] pulls a document apart one
//! type tag, name or value at a time and can skip whole subtrees without
//! building them. [`NbtWriter`] pushes a document out, buffering each open
//! list or array until it closes so that element counts never have to be
//! known in advance. Both check the NBT grammar as they go and report
//! violations as [`Error`]s.
//!
//! On top of the cursors sits an owned tag tree ([`OwnValue`],
//! [`NbtDocument`]) and, with the `serde` feature, a [`Serializer`].
//!
//! ```
//! use nbt_stream::{BEDROCK_NETWORK, NbtDocument, OwnCompound, OwnList};
//!
//! let mut scores = OwnList::new();
//! scores.push(-1i32)?;
//! scores.push(300i32)?;
//! let doc = NbtDocument::compound("", OwnCompound::new().with("scores", scores));
//!
//! let bytes = doc.to_vec(BEDROCK_NETWORK)?;
//! assert_eq!(
//!     bytes,
//!     [0x0A, 0x00, 0x09, 0x06, b's', b'c', b'o', b'r', b'e', b's', 0x03, 0x04, 0x01, 0xD8, 0x04, 0x00]
//! );
//! assert_eq!(NbtDocument::from_slice(BEDROCK_NETWORK, &bytes)?, doc);
//! # Ok::<(), nbt_stream::Error>(())
//! ```

pub use zerocopy::BigEndian;
pub use zerocopy::LittleEndian;

pub mod codec;
mod error;
mod index;
#[cfg(feature = "serde")]
pub mod ser;
mod source;
mod stream;
mod tag;
mod util;
mod value;

pub use codec::{BEDROCK, BEDROCK_NETWORK, Bedrock, BedrockNetwork, Format, JAVA, Java, Preset, Standard};
pub use error::*;
pub use index::*;
#[cfg(feature = "serde")]
pub use ser::{Serializer, to_vec, to_writer};
pub use source::*;
pub use stream::*;
pub use tag::*;
pub use util::*;
pub use value::*;
