//! Serialize any `T: Serialize` straight onto an [`NbtWriter`].
//!
//! Rust data maps onto NBT like this:
//!
//! | Rust | NBT |
//! |---|---|
//! | `bool` | `Byte` (0 or 1) |
//! | `i8`..`i64`, `f32`, `f64` | `Byte`, `Short`, `Int`, `Long`, `Float`, `Double` |
//! | `u8`..`u64` | same-width signed kind, bit pattern kept |
//! | `char`, `str` | `String` |
//! | bytes (`serde_bytes`, [`OwnValue::ByteArray`]) | `ByteArray` |
//! | `Option` | `None` is skipped, `Some(v)` is `v` |
//! | `()`, unit struct | empty `Compound` |
//! | struct, map with string keys | `Compound` |
//! | sequence, tuple | `List` |
//! | unit variant | `String` holding the variant name |
//! | other enum variants | `Compound` with one entry named after the variant |
//!
//! Sequences are written as lists whose size is resolved when they close, so
//! iterators of unknown length work. Use [`int_array`] / [`long_array`] with
//! `#[serde(serialize_with = "...")]` to write a field as an `IntArray` or
//! `LongArray` instead of a list.
//!
//! # Example
//!
//! ```
//! use nbt_stream::{JAVA, NbtDocument};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Player {
//!     name: String,
//!     health: f32,
//!     #[serde(serialize_with = "nbt_stream::ser::int_array")]
//!     position: Vec<i32>,
//! }
//!
//! let player = Player { name: "Steve".into(), health: 20.0, position: vec![0, 64, 0] };
//! let bytes = nbt_stream::to_vec(JAVA, &player)?;
//! let doc = NbtDocument::from_slice(JAVA, &bytes)?;
//! let root = doc.as_compound().unwrap();
//! assert_eq!(root.get_string("name"), Some("Steve"));
//! assert_eq!(root.get_int_array("position"), Some(&[0, 64, 0][..]));
//! # Ok::<(), nbt_stream::Error>(())
//! ```

use std::io::Write;

use serde::{Serialize, ser};

use crate::{Error, Format, NbtWriter, OwnCompound, OwnList, OwnValue, Result};

const INT_ARRAY: &str = "nbt_stream:int_array";
const LONG_ARRAY: &str = "nbt_stream:long_array";

/// Writes a sequence of `i32` as an `IntArray`. Other serializers see a
/// plain sequence.
pub fn int_array<S: ser::Serializer>(values: &[i32], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_newtype_struct(INT_ARRAY, values)
}

/// Writes a sequence of `i64` as a `LongArray`. Other serializers see a
/// plain sequence.
pub fn long_array<S: ser::Serializer>(values: &[i64], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_newtype_struct(LONG_ARRAY, values)
}

/// Serializes `value` as a document named `""` and returns the sink.
///
/// A struct or map becomes a root compound; a sequence of exactly one
/// element becomes a root list.
pub fn to_writer<F, W, T>(format: F, sink: W, value: &T) -> Result<W>
where
    F: Format,
    W: Write,
    T: ?Sized + Serialize,
{
    let mut writer = NbtWriter::new(format, sink);
    writer.name("")?;
    value.serialize(Serializer::new(&mut writer))?;
    writer.finish()
}

#[inline]
pub fn to_vec<F: Format, T: ?Sized + Serialize>(format: F, value: &T) -> Result<Vec<u8>> {
    to_writer(format, Vec::new(), value)
}

#[derive(Clone, Copy, PartialEq, Eq, Default)]
enum ArrayMode {
    #[default]
    None,
    IntArray,
    LongArray,
}

/// A [`serde::Serializer`] that writes one value at the current position of
/// an [`NbtWriter`].
///
/// Inside a compound, stage the entry name on the writer first, exactly as
/// for the writer's own value methods.
pub struct Serializer<'a, F, W> {
    writer: &'a mut NbtWriter<F, W>,
    mode: ArrayMode,
}

impl<'a, F: Format, W: Write> Serializer<'a, F, W> {
    pub fn new(writer: &'a mut NbtWriter<F, W>) -> Self {
        Self {
            writer,
            mode: ArrayMode::None,
        }
    }
}

/// What closing a [`Collector`] has to end.
#[derive(Clone, Copy)]
enum Close {
    List,
    IntArray,
    LongArray,
    Compound,
    /// A tuple variant: the list and its wrapping compound.
    VariantList,
    /// A struct variant: the inner compound and its wrapping compound.
    VariantCompound,
}

#[doc(hidden)]
pub struct Collector<'a, F, W> {
    writer: &'a mut NbtWriter<F, W>,
    close: Close,
    key: Option<String>,
}

impl<F: Format, W: Write> Collector<'_, F, W> {
    fn element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        value.serialize(Serializer::new(&mut *self.writer))
    }

    fn field<T: ?Sized + Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        self.writer.name(key)?;
        self.element(value)
    }

    fn close(self) -> Result<()> {
        match self.close {
            Close::List => self.writer.end_list(),
            Close::IntArray => self.writer.end_int_array(),
            Close::LongArray => self.writer.end_long_array(),
            Close::Compound => self.writer.end_compound(),
            Close::VariantList => {
                self.writer.end_list()?;
                self.writer.end_compound()
            }
            Close::VariantCompound => {
                self.writer.end_compound()?;
                self.writer.end_compound()
            }
        }
    }
}

impl<'a, F: Format, W: Write> Serializer<'a, F, W> {
    fn collect(self, close: Close) -> Collector<'a, F, W> {
        Collector {
            writer: self.writer,
            close,
            key: None,
        }
    }

    fn sequence(self) -> Result<Collector<'a, F, W>> {
        let close = match self.mode {
            ArrayMode::IntArray => {
                self.writer.begin_int_array()?;
                Close::IntArray
            }
            ArrayMode::LongArray => {
                self.writer.begin_long_array()?;
                Close::LongArray
            }
            ArrayMode::None => {
                self.writer.begin_list()?;
                Close::List
            }
        };
        Ok(self.collect(close))
    }

    fn compound(self) -> Result<Collector<'a, F, W>> {
        self.writer.begin_compound()?;
        Ok(self.collect(Close::Compound))
    }
}

impl<'a, F: Format, W: Write> ser::Serializer for Serializer<'a, F, W> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Collector<'a, F, W>;
    type SerializeTuple = Collector<'a, F, W>;
    type SerializeTupleStruct = Collector<'a, F, W>;
    type SerializeTupleVariant = Collector<'a, F, W>;
    type SerializeMap = Collector<'a, F, W>;
    type SerializeStruct = Collector<'a, F, W>;
    type SerializeStructVariant = Collector<'a, F, W>;

    #[inline]
    fn serialize_bool(self, v: bool) -> Result<()> {
        self.writer.bool(v)
    }

    #[inline]
    fn serialize_i8(self, v: i8) -> Result<()> {
        self.writer.byte(v)
    }

    #[inline]
    fn serialize_i16(self, v: i16) -> Result<()> {
        self.writer.short(v)
    }

    #[inline]
    fn serialize_i32(self, v: i32) -> Result<()> {
        self.writer.int(v)
    }

    #[inline]
    fn serialize_i64(self, v: i64) -> Result<()> {
        self.writer.long(v)
    }

    #[inline]
    fn serialize_u8(self, v: u8) -> Result<()> {
        self.writer.byte(v as i8)
    }

    #[inline]
    fn serialize_u16(self, v: u16) -> Result<()> {
        self.writer.short(v as i16)
    }

    #[inline]
    fn serialize_u32(self, v: u32) -> Result<()> {
        self.writer.int(v as i32)
    }

    #[inline]
    fn serialize_u64(self, v: u64) -> Result<()> {
        self.writer.long(v as i64)
    }

    #[inline]
    fn serialize_f32(self, v: f32) -> Result<()> {
        self.writer.float(v)
    }

    #[inline]
    fn serialize_f64(self, v: f64) -> Result<()> {
        self.writer.double(v)
    }

    fn serialize_char(self, v: char) -> Result<()> {
        let mut buf = [0u8; 4];
        self.writer.string(v.encode_utf8(&mut buf))
    }

    #[inline]
    fn serialize_str(self, v: &str) -> Result<()> {
        self.writer.string(v)
    }

    #[inline]
    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        self.writer.byte_array(v)
    }

    #[inline]
    fn serialize_none(self) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<()> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        self.writer.begin_compound()?;
        self.writer.end_compound()
    }

    #[inline]
    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        self.serialize_unit()
    }

    #[inline]
    fn serialize_unit_variant(self, _name: &'static str, _variant_index: u32, variant: &'static str) -> Result<()> {
        self.writer.string(variant)
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(self, name: &'static str, value: &T) -> Result<()> {
        let mode = match name {
            INT_ARRAY => ArrayMode::IntArray,
            LONG_ARRAY => ArrayMode::LongArray,
            _ => ArrayMode::None,
        };
        value.serialize(Serializer {
            writer: self.writer,
            mode,
        })
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<()> {
        self.writer.begin_compound()?;
        self.writer.name(variant)?;
        value.serialize(Serializer::new(&mut *self.writer))?;
        self.writer.end_compound()
    }

    #[inline]
    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        self.sequence()
    }

    #[inline]
    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        self.sequence()
    }

    #[inline]
    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeTupleStruct> {
        self.sequence()
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        self.writer.begin_compound()?;
        self.writer.name(variant)?;
        self.writer.begin_list()?;
        Ok(self.collect(Close::VariantList))
    }

    #[inline]
    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        self.compound()
    }

    #[inline]
    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        self.compound()
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        self.writer.begin_compound()?;
        self.writer.name(variant)?;
        self.writer.begin_compound()?;
        Ok(self.collect(Close::VariantCompound))
    }
}

impl<F: Format, W: Write> ser::SerializeSeq for Collector<'_, F, W> {
    type Ok = ();
    type Error = Error;

    #[inline]
    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.element(value)
    }

    #[inline]
    fn end(self) -> Result<()> {
        self.close()
    }
}

impl<F: Format, W: Write> ser::SerializeTuple for Collector<'_, F, W> {
    type Ok = ();
    type Error = Error;

    #[inline]
    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.element(value)
    }

    #[inline]
    fn end(self) -> Result<()> {
        self.close()
    }
}

impl<F: Format, W: Write> ser::SerializeTupleStruct for Collector<'_, F, W> {
    type Ok = ();
    type Error = Error;

    #[inline]
    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.element(value)
    }

    #[inline]
    fn end(self) -> Result<()> {
        self.close()
    }
}

impl<F: Format, W: Write> ser::SerializeTupleVariant for Collector<'_, F, W> {
    type Ok = ();
    type Error = Error;

    #[inline]
    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.element(value)
    }

    #[inline]
    fn end(self) -> Result<()> {
        self.close()
    }
}

impl<F: Format, W: Write> ser::SerializeMap for Collector<'_, F, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<()> {
        self.key = Some(key.serialize(KeySerializer)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        let key = self.key.take().ok_or(Error::MissingName)?;
        self.field(&key, value)
    }

    #[inline]
    fn end(self) -> Result<()> {
        self.close()
    }
}

impl<F: Format, W: Write> ser::SerializeStruct for Collector<'_, F, W> {
    type Ok = ();
    type Error = Error;

    #[inline]
    fn serialize_field<T: ?Sized + Serialize>(&mut self, key: &'static str, value: &T) -> Result<()> {
        self.field(key, value)
    }

    #[inline]
    fn end(self) -> Result<()> {
        self.close()
    }
}

impl<F: Format, W: Write> ser::SerializeStructVariant for Collector<'_, F, W> {
    type Ok = ();
    type Error = Error;

    #[inline]
    fn serialize_field<T: ?Sized + Serialize>(&mut self, key: &'static str, value: &T) -> Result<()> {
        self.field(key, value)
    }

    #[inline]
    fn end(self) -> Result<()> {
        self.close()
    }
}

/// Accepts only strings and chars, for compound entry names.
struct KeySerializer;

fn key_error<T>() -> Result<T> {
    Err(Error::KeyMustBeString)
}

impl ser::Serializer for KeySerializer {
    type Ok = String;
    type Error = Error;

    type SerializeSeq = ser::Impossible<String, Error>;
    type SerializeTuple = ser::Impossible<String, Error>;
    type SerializeTupleStruct = ser::Impossible<String, Error>;
    type SerializeTupleVariant = ser::Impossible<String, Error>;
    type SerializeMap = ser::Impossible<String, Error>;
    type SerializeStruct = ser::Impossible<String, Error>;
    type SerializeStructVariant = ser::Impossible<String, Error>;

    #[inline]
    fn serialize_str(self, v: &str) -> Result<String> {
        Ok(v.to_owned())
    }

    #[inline]
    fn serialize_char(self, v: char) -> Result<String> {
        Ok(v.to_string())
    }

    #[inline]
    fn serialize_unit_variant(self, _name: &'static str, _variant_index: u32, variant: &'static str) -> Result<String> {
        Ok(variant.to_owned())
    }

    #[inline]
    fn serialize_newtype_struct<T: ?Sized + Serialize>(self, _name: &'static str, value: &T) -> Result<String> {
        value.serialize(self)
    }

    fn serialize_bool(self, _v: bool) -> Result<String> {
        key_error()
    }

    fn serialize_i8(self, _v: i8) -> Result<String> {
        key_error()
    }

    fn serialize_i16(self, _v: i16) -> Result<String> {
        key_error()
    }

    fn serialize_i32(self, _v: i32) -> Result<String> {
        key_error()
    }

    fn serialize_i64(self, _v: i64) -> Result<String> {
        key_error()
    }

    fn serialize_u8(self, _v: u8) -> Result<String> {
        key_error()
    }

    fn serialize_u16(self, _v: u16) -> Result<String> {
        key_error()
    }

    fn serialize_u32(self, _v: u32) -> Result<String> {
        key_error()
    }

    fn serialize_u64(self, _v: u64) -> Result<String> {
        key_error()
    }

    fn serialize_f32(self, _v: f32) -> Result<String> {
        key_error()
    }

    fn serialize_f64(self, _v: f64) -> Result<String> {
        key_error()
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String> {
        key_error()
    }

    fn serialize_none(self) -> Result<String> {
        key_error()
    }

    fn serialize_some<T: ?Sized + Serialize>(self, _value: &T) -> Result<String> {
        key_error()
    }

    fn serialize_unit(self) -> Result<String> {
        key_error()
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String> {
        key_error()
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String> {
        key_error()
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        key_error()
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        key_error()
    }

    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeTupleStruct> {
        key_error()
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        key_error()
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        key_error()
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        key_error()
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        key_error()
    }
}

impl Serialize for OwnValue {
    fn serialize<S: ser::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            OwnValue::Byte(v) => serializer.serialize_i8(*v),
            OwnValue::Short(v) => serializer.serialize_i16(*v),
            OwnValue::Int(v) => serializer.serialize_i32(*v),
            OwnValue::Long(v) => serializer.serialize_i64(*v),
            OwnValue::Float(v) => serializer.serialize_f32(*v),
            OwnValue::Double(v) => serializer.serialize_f64(*v),
            OwnValue::ByteArray(v) => serializer.serialize_bytes(v),
            OwnValue::String(v) => serializer.serialize_str(v),
            OwnValue::List(v) => v.serialize(serializer),
            OwnValue::Compound(v) => v.serialize(serializer),
            OwnValue::IntArray(v) => int_array(v, serializer),
            OwnValue::LongArray(v) => long_array(v, serializer),
        }
    }
}

impl Serialize for OwnList {
    fn serialize<S: ser::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl Serialize for OwnCompound {
    fn serialize<S: ser::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}
