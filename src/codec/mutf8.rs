//! Java's modified UTF-8.
//!
//! Differs from standard UTF-8 in two places: U+0000 is written as the two
//! bytes `C0 80`, and characters outside the BMP are written as a surrogate
//! pair of two independent three-byte sequences instead of one four-byte
//! sequence. Transcoding is done by `simd_cesu8`; this module adds the strict
//! structural check that reports where a payload goes wrong.

use std::borrow::Cow;

use crate::{Error, Result};

/// Encodes `value`, borrowing when the text is already valid modified UTF-8.
///
/// ```
/// use nbt_stream::codec::mutf8;
///
/// assert_eq!(&*mutf8::encode("hi"), b"hi");
/// assert_eq!(&*mutf8::encode("\0"), [0xC0, 0x80]);
/// assert_eq!(mutf8::encode("\u{1F600}").len(), 6);
/// ```
#[inline]
pub fn encode(value: &str) -> Cow<'_, [u8]> {
    simd_cesu8::mutf8::encode(value)
}

/// Checks the continuation structure of a payload.
///
/// On failure the error carries the offset of the first byte of the offending
/// sequence.
pub fn validate(bytes: &[u8]) -> Result<()> {
    let len = bytes.len();
    let mut i = 0;
    while i < len {
        let lead = bytes[i];
        let width = match lead >> 4 {
            0..=7 => 1,
            12 | 13 => 2,
            14 => 3,
            _ => return Err(Error::InvalidMUTF8 { offset: i }),
        };
        if i + width > len {
            return Err(Error::InvalidMUTF8 { offset: i });
        }
        if bytes[i + 1..i + width].iter().any(|b| b & 0xC0 != 0x80) {
            return Err(Error::InvalidMUTF8 { offset: i });
        }
        i += width;
    }
    Ok(())
}

/// Decodes a payload whose exact byte length is already known.
///
/// Unpaired surrogates cannot be represented in a Rust string and decode to
/// U+FFFD.
pub fn decode(bytes: &[u8]) -> Result<Cow<'_, str>> {
    if bytes.is_empty() {
        return Ok(Cow::Borrowed(""));
    }
    validate(bytes)?;
    Ok(simd_cesu8::mutf8::decode_lossy(bytes))
}
