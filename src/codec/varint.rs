//! Unsigned LEB128-style VarInts and their ZigZag-signed counterparts.
//!
//! Seven data bits per byte, least significant group first, high bit set on
//! every byte but the last. Only the Bedrock network format uses these.

use std::io::{Read, Write};

use crate::{Error, Result};

/// Maximum encoded length of a 32-bit VarInt.
pub const MAX_VARINT_LEN: usize = 5;

/// Maximum encoded length of a 64-bit VarLong.
pub const MAX_VARLONG_LEN: usize = 10;

/// Maps a signed value onto the unsigned range so that small magnitudes stay small.
///
/// ```
/// use nbt_stream::codec::varint::{unzigzag32, zigzag32};
///
/// assert_eq!(zigzag32(-1), 1);
/// assert_eq!(zigzag32(1), 2);
/// assert_eq!(unzigzag32(zigzag32(i32::MIN)), i32::MIN);
/// ```
#[inline]
pub const fn zigzag32(n: i32) -> u32 {
    ((n << 1) ^ (n >> 31)) as u32
}

#[inline]
pub const fn unzigzag32(u: u32) -> i32 {
    ((u >> 1) as i32) ^ -((u & 1) as i32)
}

#[inline]
pub const fn zigzag64(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

#[inline]
pub const fn unzigzag64(u: u64) -> i64 {
    ((u >> 1) as i64) ^ -((u & 1) as i64)
}

#[inline]
fn read_u8(src: &mut impl Read) -> Result<u8> {
    let mut byte = [0u8; 1];
    src.read_exact(&mut byte)?;
    Ok(byte[0])
}

/// Reads a VarInt. More than [`MAX_VARINT_LEN`] bytes is malformed.
pub fn read_var_u32(src: &mut impl Read) -> Result<u32> {
    let mut result = 0u32;
    for i in 0..MAX_VARINT_LEN {
        let byte = read_u8(src)?;
        result |= ((byte & 0x7F) as u32) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(result);
        }
    }
    Err(Error::VarIntTooLong {
        max_bytes: MAX_VARINT_LEN,
    })
}

/// Reads a VarLong. More than [`MAX_VARLONG_LEN`] bytes is malformed.
pub fn read_var_u64(src: &mut impl Read) -> Result<u64> {
    let mut result = 0u64;
    for i in 0..MAX_VARLONG_LEN {
        let byte = read_u8(src)?;
        result |= ((byte & 0x7F) as u64) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(result);
        }
    }
    Err(Error::VarIntTooLong {
        max_bytes: MAX_VARLONG_LEN,
    })
}

/// Encodes `value` into `buf`, returning the number of bytes used.
#[inline]
pub fn encode_var_u64(mut value: u64, buf: &mut [u8; MAX_VARLONG_LEN]) -> usize {
    let mut len = 0;
    loop {
        let bits = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf[len] = bits;
            return len + 1;
        }
        buf[len] = bits | 0x80;
        len += 1;
    }
}

pub fn write_var_u32(dst: &mut impl Write, value: u32) -> Result<()> {
    write_var_u64(dst, value as u64)
}

pub fn write_var_u64(dst: &mut impl Write, value: u64) -> Result<()> {
    let mut buf = [0u8; MAX_VARLONG_LEN];
    let len = encode_var_u64(value, &mut buf);
    dst.write_all(&buf[..len])?;
    Ok(())
}

#[inline]
pub fn read_var_i32(src: &mut impl Read) -> Result<i32> {
    read_var_u32(src).map(unzigzag32)
}

#[inline]
pub fn read_var_i64(src: &mut impl Read) -> Result<i64> {
    read_var_u64(src).map(unzigzag64)
}

#[inline]
pub fn write_var_i32(dst: &mut impl Write, value: i32) -> Result<()> {
    write_var_u32(dst, zigzag32(value))
}

#[inline]
pub fn write_var_i64(dst: &mut impl Write, value: i64) -> Result<()> {
    write_var_u64(dst, zigzag64(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_i32(value: i32) -> Vec<u8> {
        let mut buf = Vec::new();
        write_var_i32(&mut buf, value).unwrap();
        buf
    }

    #[test]
    fn test_zigzag_small_values() {
        assert_eq!(encode_i32(0), [0x00]);
        assert_eq!(encode_i32(-1), [0x01]);
        assert_eq!(encode_i32(1), [0x02]);
        assert_eq!(encode_i32(-2), [0x03]);
        assert_eq!(encode_i32(63), [0x7E]);
        assert_eq!(encode_i32(-65), [0x81, 0x01]);
    }

    #[test]
    fn test_zigzag_extremes() {
        for n in [i32::MIN, i32::MIN + 1, -300, 300, i32::MAX - 1, i32::MAX] {
            assert_eq!(unzigzag32(zigzag32(n)), n);
            assert_eq!(read_var_i32(&mut &encode_i32(n)[..]).unwrap(), n);
        }
        for n in [i64::MIN, -1, 0, 1, i64::MAX] {
            assert_eq!(unzigzag64(zigzag64(n)), n);
        }
        assert_eq!(encode_i32(i32::MIN).len(), MAX_VARINT_LEN);
    }

    #[test]
    fn test_unsigned_encoding() {
        let mut buf = Vec::new();
        write_var_u32(&mut buf, 300).unwrap();
        assert_eq!(buf, [0xAC, 0x02]);
        assert_eq!(read_var_u32(&mut &buf[..]).unwrap(), 300);

        let mut buf = Vec::new();
        write_var_u64(&mut buf, u64::MAX).unwrap();
        assert_eq!(buf.len(), MAX_VARLONG_LEN);
        assert_eq!(read_var_u64(&mut &buf[..]).unwrap(), u64::MAX);
    }

    #[test]
    fn test_varint_too_long() {
        let data = [0xFFu8; 6];
        assert!(matches!(
            read_var_u32(&mut &data[..]),
            Err(Error::VarIntTooLong { max_bytes: 5 })
        ));
        let data = [0x80u8; 11];
        assert!(matches!(
            read_var_u64(&mut &data[..]),
            Err(Error::VarIntTooLong { max_bytes: 10 })
        ));
    }

    #[test]
    fn test_varint_truncated_is_io() {
        let data = [0x80u8, 0x80];
        let err = read_var_u32(&mut &data[..]).unwrap_err();
        assert!(err.is_io());
    }
}
