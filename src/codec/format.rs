use std::{
    fmt,
    io::{Read, Write},
    marker::PhantomData,
    str::FromStr,
};

use zerocopy::byteorder;

use crate::{
    BigEndian, ByteOrder, Error, LittleEndian, Result, Source, TagID,
    codec::varint::{read_var_i32, read_var_i64, read_var_u32, write_var_i32, write_var_i64, write_var_u32},
};

/// How one NBT variant encodes numbers and string lengths.
///
/// Type-tag bytes and `Byte` payloads are single bytes in every variant; all
/// other primitives go through a `Format`. Formats carry no state, so one
/// value can be shared by any number of readers and writers.
pub trait Format: Copy + Send + Sync + 'static {
    /// Constant payload width of `tag`, or `None` when it varies.
    fn payload_width(&self, tag: TagID) -> Option<u64>;

    /// Largest encoded string the length prefix can describe.
    fn max_utf_length(&self) -> usize;

    fn read_short<R: Read>(&self, src: &mut R) -> Result<i16>;
    fn read_int<R: Read>(&self, src: &mut R) -> Result<i32>;
    fn read_long<R: Read>(&self, src: &mut R) -> Result<i64>;
    fn read_float<R: Read>(&self, src: &mut R) -> Result<f32>;
    fn read_double<R: Read>(&self, src: &mut R) -> Result<f64>;
    fn read_utf_length<R: Read>(&self, src: &mut R) -> Result<usize>;

    fn write_short<W: Write>(&self, dst: &mut W, value: i16) -> Result<()>;
    fn write_int<W: Write>(&self, dst: &mut W, value: i32) -> Result<()>;
    fn write_long<W: Write>(&self, dst: &mut W, value: i64) -> Result<()>;
    fn write_float<W: Write>(&self, dst: &mut W, value: f32) -> Result<()>;
    fn write_double<W: Write>(&self, dst: &mut W, value: f64) -> Result<()>;
    fn write_utf_length<W: Write>(&self, dst: &mut W, len: usize) -> Result<()>;

    /// Skips one numeric payload of kind `tag` without decoding it.
    ///
    /// Constant-width kinds are skipped by seeking; variable-width ones are
    /// read and discarded.
    fn skip_number<S: Source>(&self, src: &mut S, tag: TagID) -> Result<()> {
        if let Some(width) = self.payload_width(tag) {
            return src.skip_bytes(width);
        }
        match tag {
            TagID::Int => self.read_int(src).map(drop),
            TagID::Long => self.read_long(src).map(drop),
            other => Err(Error::TagMismatch {
                expected: TagID::Long,
                actual: other,
            }),
        }
    }
}

/// Fixed-width numbers and a two-byte string length, in byte order `O`.
pub struct Standard<O: ByteOrder> {
    _marker: PhantomData<O>,
}

impl<O: ByteOrder> Standard<O> {
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<O: ByteOrder> Clone for Standard<O> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<O: ByteOrder> Copy for Standard<O> {}

impl<O: ByteOrder> Default for Standard<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: ByteOrder> fmt::Debug for Standard<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Standard<{}>", std::any::type_name::<O>())
    }
}

#[inline]
fn read_array<const N: usize, R: Read>(src: &mut R) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    src.read_exact(&mut buf)?;
    Ok(buf)
}

impl<O: ByteOrder> Format for Standard<O> {
    #[inline]
    fn payload_width(&self, tag: TagID) -> Option<u64> {
        match tag {
            TagID::Byte => Some(1),
            TagID::Short => Some(2),
            TagID::Int | TagID::Float => Some(4),
            TagID::Long | TagID::Double => Some(8),
            _ => None,
        }
    }

    #[inline]
    fn max_utf_length(&self) -> usize {
        u16::MAX as usize
    }

    #[inline]
    fn read_short<R: Read>(&self, src: &mut R) -> Result<i16> {
        Ok(byteorder::I16::<O>::from_bytes(read_array(src)?).get())
    }

    #[inline]
    fn read_int<R: Read>(&self, src: &mut R) -> Result<i32> {
        Ok(byteorder::I32::<O>::from_bytes(read_array(src)?).get())
    }

    #[inline]
    fn read_long<R: Read>(&self, src: &mut R) -> Result<i64> {
        Ok(byteorder::I64::<O>::from_bytes(read_array(src)?).get())
    }

    #[inline]
    fn read_float<R: Read>(&self, src: &mut R) -> Result<f32> {
        Ok(byteorder::F32::<O>::from_bytes(read_array(src)?).get())
    }

    #[inline]
    fn read_double<R: Read>(&self, src: &mut R) -> Result<f64> {
        Ok(byteorder::F64::<O>::from_bytes(read_array(src)?).get())
    }

    #[inline]
    fn read_utf_length<R: Read>(&self, src: &mut R) -> Result<usize> {
        Ok(byteorder::U16::<O>::from_bytes(read_array(src)?).get() as usize)
    }

    #[inline]
    fn write_short<W: Write>(&self, dst: &mut W, value: i16) -> Result<()> {
        Ok(dst.write_all(&byteorder::I16::<O>::new(value).to_bytes())?)
    }

    #[inline]
    fn write_int<W: Write>(&self, dst: &mut W, value: i32) -> Result<()> {
        Ok(dst.write_all(&byteorder::I32::<O>::new(value).to_bytes())?)
    }

    #[inline]
    fn write_long<W: Write>(&self, dst: &mut W, value: i64) -> Result<()> {
        Ok(dst.write_all(&byteorder::I64::<O>::new(value).to_bytes())?)
    }

    #[inline]
    fn write_float<W: Write>(&self, dst: &mut W, value: f32) -> Result<()> {
        Ok(dst.write_all(&byteorder::F32::<O>::new(value).to_bytes())?)
    }

    #[inline]
    fn write_double<W: Write>(&self, dst: &mut W, value: f64) -> Result<()> {
        Ok(dst.write_all(&byteorder::F64::<O>::new(value).to_bytes())?)
    }

    #[inline]
    fn write_utf_length<W: Write>(&self, dst: &mut W, len: usize) -> Result<()> {
        let len = u16::try_from(len).map_err(|_| Error::StringTooLong(len))?;
        Ok(dst.write_all(&byteorder::U16::<O>::new(len).to_bytes())?)
    }
}

/// Bedrock's network encoding: little-endian, with ZigZag VarInt/VarLong
/// `Int`/`Long` payloads (list and array counts included) and a plain VarInt
/// string length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BedrockNetwork;

const LE: Standard<LittleEndian> = Standard::new();

impl Format for BedrockNetwork {
    #[inline]
    fn payload_width(&self, tag: TagID) -> Option<u64> {
        match tag {
            TagID::Int | TagID::Long => None,
            other => LE.payload_width(other),
        }
    }

    #[inline]
    fn max_utf_length(&self) -> usize {
        i32::MAX as usize
    }

    #[inline]
    fn read_short<R: Read>(&self, src: &mut R) -> Result<i16> {
        LE.read_short(src)
    }

    #[inline]
    fn read_int<R: Read>(&self, src: &mut R) -> Result<i32> {
        read_var_i32(src)
    }

    #[inline]
    fn read_long<R: Read>(&self, src: &mut R) -> Result<i64> {
        read_var_i64(src)
    }

    #[inline]
    fn read_float<R: Read>(&self, src: &mut R) -> Result<f32> {
        LE.read_float(src)
    }

    #[inline]
    fn read_double<R: Read>(&self, src: &mut R) -> Result<f64> {
        LE.read_double(src)
    }

    #[inline]
    fn read_utf_length<R: Read>(&self, src: &mut R) -> Result<usize> {
        Ok(read_var_u32(src)? as usize)
    }

    #[inline]
    fn write_short<W: Write>(&self, dst: &mut W, value: i16) -> Result<()> {
        LE.write_short(dst, value)
    }

    #[inline]
    fn write_int<W: Write>(&self, dst: &mut W, value: i32) -> Result<()> {
        write_var_i32(dst, value)
    }

    #[inline]
    fn write_long<W: Write>(&self, dst: &mut W, value: i64) -> Result<()> {
        write_var_i64(dst, value)
    }

    #[inline]
    fn write_float<W: Write>(&self, dst: &mut W, value: f32) -> Result<()> {
        LE.write_float(dst, value)
    }

    #[inline]
    fn write_double<W: Write>(&self, dst: &mut W, value: f64) -> Result<()> {
        LE.write_double(dst, value)
    }

    #[inline]
    fn write_utf_length<W: Write>(&self, dst: &mut W, len: usize) -> Result<()> {
        if len > self.max_utf_length() {
            return Err(Error::StringTooLong(len));
        }
        write_var_u32(dst, len as u32)
    }
}

/// Java Edition: big-endian, fixed width.
pub type Java = Standard<BigEndian>;

/// Bedrock Edition files: little-endian, fixed width.
pub type Bedrock = Standard<LittleEndian>;

pub const JAVA: Java = Standard::new();
pub const BEDROCK: Bedrock = Standard::new();
pub const BEDROCK_NETWORK: BedrockNetwork = BedrockNetwork;

/// A format chosen at run time.
///
/// ```
/// use nbt_stream::Preset;
///
/// let preset: Preset = "bedrock-network".parse().unwrap();
/// assert_eq!(preset, Preset::BedrockNetwork);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Preset {
    Java,
    Bedrock,
    BedrockNetwork,
}

macro_rules! delegate {
    ($self:ident, $format:ident => $body:expr) => {
        match $self {
            Preset::Java => {
                let $format = JAVA;
                $body
            }
            Preset::Bedrock => {
                let $format = BEDROCK;
                $body
            }
            Preset::BedrockNetwork => {
                let $format = BEDROCK_NETWORK;
                $body
            }
        }
    };
}

impl Format for Preset {
    fn payload_width(&self, tag: TagID) -> Option<u64> {
        delegate!(self, f => f.payload_width(tag))
    }

    fn max_utf_length(&self) -> usize {
        delegate!(self, f => f.max_utf_length())
    }

    fn read_short<R: Read>(&self, src: &mut R) -> Result<i16> {
        delegate!(self, f => f.read_short(src))
    }

    fn read_int<R: Read>(&self, src: &mut R) -> Result<i32> {
        delegate!(self, f => f.read_int(src))
    }

    fn read_long<R: Read>(&self, src: &mut R) -> Result<i64> {
        delegate!(self, f => f.read_long(src))
    }

    fn read_float<R: Read>(&self, src: &mut R) -> Result<f32> {
        delegate!(self, f => f.read_float(src))
    }

    fn read_double<R: Read>(&self, src: &mut R) -> Result<f64> {
        delegate!(self, f => f.read_double(src))
    }

    fn read_utf_length<R: Read>(&self, src: &mut R) -> Result<usize> {
        delegate!(self, f => f.read_utf_length(src))
    }

    fn write_short<W: Write>(&self, dst: &mut W, value: i16) -> Result<()> {
        delegate!(self, f => f.write_short(dst, value))
    }

    fn write_int<W: Write>(&self, dst: &mut W, value: i32) -> Result<()> {
        delegate!(self, f => f.write_int(dst, value))
    }

    fn write_long<W: Write>(&self, dst: &mut W, value: i64) -> Result<()> {
        delegate!(self, f => f.write_long(dst, value))
    }

    fn write_float<W: Write>(&self, dst: &mut W, value: f32) -> Result<()> {
        delegate!(self, f => f.write_float(dst, value))
    }

    fn write_double<W: Write>(&self, dst: &mut W, value: f64) -> Result<()> {
        delegate!(self, f => f.write_double(dst, value))
    }

    fn write_utf_length<W: Write>(&self, dst: &mut W, len: usize) -> Result<()> {
        delegate!(self, f => f.write_utf_length(dst, len))
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "java" => Ok(Preset::Java),
            "bedrock" => Ok(Preset::Bedrock),
            "bedrock-network" | "bedrock_network" => Ok(Preset::BedrockNetwork),
            other => Err(format!("unknown NBT format: {other}")),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Preset::Java => "java",
            Preset::Bedrock => "bedrock",
            Preset::BedrockNetwork => "bedrock-network",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_orders() {
        let mut be = Vec::new();
        JAVA.write_int(&mut be, 0x0102_0304).unwrap();
        assert_eq!(be, [1, 2, 3, 4]);

        let mut le = Vec::new();
        BEDROCK.write_int(&mut le, 0x0102_0304).unwrap();
        assert_eq!(le, [4, 3, 2, 1]);

        assert_eq!(JAVA.read_int(&mut &be[..]).unwrap(), 0x0102_0304);
        assert_eq!(BEDROCK.read_int(&mut &le[..]).unwrap(), 0x0102_0304);
    }

    #[test]
    fn test_floats_are_bit_exact() {
        let mut buf = Vec::new();
        JAVA.write_double(&mut buf, -0.0).unwrap();
        assert_eq!(buf, (-0.0f64).to_be_bytes());
        let nan = f32::from_bits(0x7FC0_0001);
        let mut buf = Vec::new();
        BEDROCK.write_float(&mut buf, nan).unwrap();
        assert_eq!(BEDROCK.read_float(&mut &buf[..]).unwrap().to_bits(), 0x7FC0_0001);
    }

    #[test]
    fn test_utf_length_limits() {
        let mut buf = Vec::new();
        JAVA.write_utf_length(&mut buf, 0xFFFF).unwrap();
        assert_eq!(buf, [0xFF, 0xFF]);
        assert!(matches!(
            JAVA.write_utf_length(&mut buf, 0x1_0000),
            Err(Error::StringTooLong(0x1_0000))
        ));

        let mut buf = Vec::new();
        BEDROCK.write_utf_length(&mut buf, 0x0102).unwrap();
        assert_eq!(buf, [0x02, 0x01]);
        assert_eq!(BEDROCK.read_utf_length(&mut &buf[..]).unwrap(), 0x0102);
    }

    #[test]
    fn test_network_format() {
        let mut buf = Vec::new();
        BEDROCK_NETWORK.write_int(&mut buf, -1).unwrap();
        BEDROCK_NETWORK.write_long(&mut buf, 1).unwrap();
        BEDROCK_NETWORK.write_utf_length(&mut buf, 300).unwrap();
        BEDROCK_NETWORK.write_short(&mut buf, 1).unwrap();
        assert_eq!(buf, [0x01, 0x02, 0xAC, 0x02, 0x01, 0x00]);

        assert_eq!(BEDROCK_NETWORK.payload_width(TagID::Int), None);
        assert_eq!(BEDROCK_NETWORK.payload_width(TagID::Double), Some(8));
        assert_eq!(JAVA.payload_width(TagID::String), None);
    }

    #[test]
    fn test_skip_number() {
        let mut src: &[u8] = &[0x80, 0x01, 0xAA];
        BEDROCK_NETWORK.skip_number(&mut src, TagID::Int).unwrap();
        assert_eq!(src, [0xAA]);

        let mut src: &[u8] = &[0, 0, 0, 0, 0, 0, 0, 0, 0xBB];
        JAVA.skip_number(&mut src, TagID::Long).unwrap();
        assert_eq!(src, [0xBB]);
    }

    #[test]
    fn test_preset_delegates() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        Preset::BedrockNetwork.write_long(&mut a, -5).unwrap();
        BEDROCK_NETWORK.write_long(&mut b, -5).unwrap();
        assert_eq!(a, b);
        assert_eq!("JAVA".parse::<Preset>().unwrap(), Preset::Java);
        assert!("pocket".parse::<Preset>().is_err());
        assert_eq!(Preset::Bedrock.to_string(), "bedrock");
    }
}
