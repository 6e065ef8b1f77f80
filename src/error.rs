//! Error types for NBT reading and writing.
//!
//! Every failure is an [`Error`]. Transport failures arrive as
//! [`Error::IO`], unchanged from the underlying stream (a truncated document
//! surfaces as an [`std::io::ErrorKind::UnexpectedEof`] I/O error). Everything
//! else means the bytes or the calls did not follow the NBT grammar, and
//! [`Error::is_malformed`] tells the two apart.
//!
//! # Example
//!
//! ```
//! use nbt_stream::{Error, JAVA, NbtReader};
//!
//! let mut reader = NbtReader::new(JAVA, &[0x0D][..]);
//! match reader.next_type() {
//!     Err(Error::InvalidTagType(tag)) => assert_eq!(tag, 0x0D),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

use std::fmt::{self, Display};

use crate::TagID;

/// Alias for a `Result` with the error type [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// This type represents all possible errors that can occur when reading or
/// writing NBT data.
#[derive(Debug)]
pub enum Error {
    /// A custom message, produced by serde.
    Message(String),

    /// An I/O error occurred in the underlying byte stream.
    IO(std::io::Error),

    /// A type-tag byte outside `0..=12` was found.
    InvalidTagType(u8),

    /// A value of one kind was expected and another was found.
    TagMismatch { expected: TagID, actual: TagID },

    /// More elements were consumed from a list or array than it declared.
    ListOverrun(TagID),

    /// A list or array was closed before all of its declared elements were consumed.
    ListUnderrun { kind: TagID, remaining: u32 },

    /// A list, array or string declared a negative length.
    NegativeLength(i64),

    /// A list or array holds more elements than its count field can express.
    ListTooLong(usize),

    /// An encoded string does not fit the format's length prefix.
    StringTooLong(usize),

    /// A string payload is not valid modified UTF-8.
    InvalidMUTF8 { offset: usize },

    /// A VarInt ran past its maximum encoded length.
    VarIntTooLong { max_bytes: usize },

    /// The document root is neither a compound nor a list.
    InvalidRoot(TagID),

    /// Containers are nested deeper than the reader allows.
    TooDeep(usize),

    /// A compound entry or root value was written without a name.
    MissingName,

    /// A name was given where no name belongs (inside a list or array).
    NameNotAllowed,

    /// A container was ended, or queried, while not open.
    NotInContainer(TagID),

    /// The writer was finished while a container was still open.
    Unterminated(TagID),

    /// A root list must hold exactly one element.
    RootListLength(usize),

    /// A value was written after the root value was complete.
    DocumentComplete,

    /// The writer was finished before any root value was written.
    NoRoot,

    /// Map key must be a string type.
    KeyMustBeString,
}

impl Error {
    /// Returns `true` if the underlying stream failed.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::IO(_))
    }

    /// Returns `true` if the data (or the sequence of calls) broke the NBT
    /// grammar, as opposed to the transport failing.
    pub fn is_malformed(&self) -> bool {
        !self.is_io()
    }
}

impl From<std::io::Error> for Error {
    #[inline]
    fn from(error: std::io::Error) -> Self {
        Error::IO(error)
    }
}

#[cfg(feature = "serde")]
impl serde::ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Message(message) => formatter.write_str(message),
            Error::IO(error) => formatter.write_str(&error.to_string()),
            Error::InvalidTagType(tag) => {
                formatter.write_str(&format!("invalid NBT tag type: {tag:#04x}"))
            }
            Error::TagMismatch { expected, actual } => {
                formatter.write_str(&format!("expected {expected}, got {actual}"))
            }
            Error::ListOverrun(kind) => {
                formatter.write_str(&format!("read past the declared length of {kind}"))
            }
            Error::ListUnderrun { kind, remaining } => formatter.write_str(&format!(
                "{kind} closed with {remaining} declared elements unread"
            )),
            Error::NegativeLength(len) => {
                formatter.write_str(&format!("negative length: {len}"))
            }
            Error::ListTooLong(len) => formatter.write_str(&format!("list length too long: {len}")),
            Error::StringTooLong(len) => {
                formatter.write_str(&format!("string too long: {len} encoded bytes"))
            }
            Error::InvalidMUTF8 { offset } => formatter.write_str(&format!(
                "malformed modified UTF-8 around byte {offset}"
            )),
            Error::VarIntTooLong { max_bytes } => {
                formatter.write_str(&format!("VarInt longer than {max_bytes} bytes"))
            }
            Error::InvalidRoot(kind) => {
                formatter.write_str(&format!("{kind} cannot be a root tag"))
            }
            Error::TooDeep(depth) => {
                formatter.write_str(&format!("nesting depth exceeds {depth}"))
            }
            Error::MissingName => formatter.write_str("missing tag name"),
            Error::NameNotAllowed => {
                formatter.write_str("names are not allowed outside of compound tags")
            }
            Error::NotInContainer(kind) => formatter.write_str(&format!("not in a {kind}")),
            Error::Unterminated(kind) => formatter.write_str(&format!("unterminated {kind}")),
            Error::RootListLength(len) => formatter.write_str(&format!(
                "root list must hold exactly one element, got {len}"
            )),
            Error::DocumentComplete => formatter.write_str("root tag already complete"),
            Error::NoRoot => formatter.write_str("no root tag written"),
            Error::KeyMustBeString => formatter.write_str("map key must be a string"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IO(error) => Some(error),
            _ => None,
        }
    }
}
