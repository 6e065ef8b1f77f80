use std::hash::{Hash, Hasher};

use crate::{Index, Number, OwnCompound, OwnList, TagID};

/// One node of an owned tag tree.
///
/// Children are owned exclusively by their parent, so a tree can never
/// contain itself. [`Clone`] is the deep copy.
///
/// Equality is structural and kind-aware: `Byte(0) != Short(0)`, lists and
/// arrays compare element by element in order, and floats compare by bit
/// pattern so that `Eq` and `Hash` agree (`NaN == NaN`, `0.0 != -0.0`).
#[derive(Clone, Debug)]
pub enum OwnValue {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<u8>),
    String(String),
    List(OwnList),
    Compound(OwnCompound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

macro_rules! copy_accessor {
    ($($name:ident => $variant:ident: $ty:ty),* $(,)?) => {
        $(
            #[inline]
            pub fn $name(&self) -> Option<$ty> {
                match self {
                    OwnValue::$variant(value) => Some(*value),
                    _ => None,
                }
            }
        )*
    };
}

macro_rules! ref_accessor {
    ($($name:ident, $name_mut:ident => $variant:ident: $ty:ty, $ty_mut:ty),* $(,)?) => {
        $(
            #[inline]
            pub fn $name(&self) -> Option<&$ty> {
                match self {
                    OwnValue::$variant(value) => {
                        let value: &$ty = value;
                        Some(value)
                    }
                    _ => None,
                }
            }

            #[inline]
            pub fn $name_mut(&mut self) -> Option<&mut $ty_mut> {
                match self {
                    OwnValue::$variant(value) => Some(value),
                    _ => None,
                }
            }
        )*
    };
}

impl OwnValue {
    pub const fn tag_id(&self) -> TagID {
        match self {
            OwnValue::Byte(_) => TagID::Byte,
            OwnValue::Short(_) => TagID::Short,
            OwnValue::Int(_) => TagID::Int,
            OwnValue::Long(_) => TagID::Long,
            OwnValue::Float(_) => TagID::Float,
            OwnValue::Double(_) => TagID::Double,
            OwnValue::ByteArray(_) => TagID::ByteArray,
            OwnValue::String(_) => TagID::String,
            OwnValue::List(_) => TagID::List,
            OwnValue::Compound(_) => TagID::Compound,
            OwnValue::IntArray(_) => TagID::IntArray,
            OwnValue::LongArray(_) => TagID::LongArray,
        }
    }

    copy_accessor! {
        as_byte => Byte: i8,
        as_short => Short: i16,
        as_int => Int: i32,
        as_long => Long: i64,
        as_float => Float: f32,
        as_double => Double: f64,
    }

    ref_accessor! {
        as_byte_array, as_byte_array_mut => ByteArray: [u8], Vec<u8>,
        as_string, as_string_mut => String: str, String,
        as_list, as_list_mut => List: OwnList, OwnList,
        as_compound, as_compound_mut => Compound: OwnCompound, OwnCompound,
        as_int_array, as_int_array_mut => IntArray: [i32], Vec<i32>,
        as_long_array, as_long_array_mut => LongArray: [i64], Vec<i64>,
    }

    /// Reads a `Byte` as a flag; any non-zero value is `true`.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        self.as_byte().map(|value| value != 0)
    }

    /// Reads any of the six numeric kinds. See [`Number`] for the conversions.
    pub fn as_number(&self) -> Option<Number> {
        Some(match *self {
            OwnValue::Byte(value) => Number::Byte(value),
            OwnValue::Short(value) => Number::Short(value),
            OwnValue::Int(value) => Number::Int(value),
            OwnValue::Long(value) => Number::Long(value),
            OwnValue::Float(value) => Number::Float(value),
            OwnValue::Double(value) => Number::Double(value),
            _ => return None,
        })
    }

    /// Gets a list element by position or a compound entry by name.
    #[inline]
    pub fn get<I: Index>(&self, index: I) -> Option<&OwnValue> {
        index.index_into(self)
    }

    #[inline]
    pub fn get_mut<I: Index>(&mut self, index: I) -> Option<&mut OwnValue> {
        index.index_into_mut(self)
    }
}

impl From<Number> for OwnValue {
    fn from(value: Number) -> Self {
        match value {
            Number::Byte(value) => OwnValue::Byte(value),
            Number::Short(value) => OwnValue::Short(value),
            Number::Int(value) => OwnValue::Int(value),
            Number::Long(value) => OwnValue::Long(value),
            Number::Float(value) => OwnValue::Float(value),
            Number::Double(value) => OwnValue::Double(value),
        }
    }
}

macro_rules! from_impl {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for OwnValue {
                #[inline]
                fn from(value: $ty) -> Self {
                    OwnValue::$variant(value)
                }
            }
        )*
    };
}

from_impl! {
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    Vec<u8> => ByteArray,
    String => String,
    OwnList => List,
    OwnCompound => Compound,
    Vec<i32> => IntArray,
    Vec<i64> => LongArray,
}

impl From<bool> for OwnValue {
    #[inline]
    fn from(value: bool) -> Self {
        OwnValue::Byte(value as i8)
    }
}

impl From<&str> for OwnValue {
    #[inline]
    fn from(value: &str) -> Self {
        OwnValue::String(value.to_owned())
    }
}

impl PartialEq for OwnValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (OwnValue::Byte(a), OwnValue::Byte(b)) => a == b,
            (OwnValue::Short(a), OwnValue::Short(b)) => a == b,
            (OwnValue::Int(a), OwnValue::Int(b)) => a == b,
            (OwnValue::Long(a), OwnValue::Long(b)) => a == b,
            (OwnValue::Float(a), OwnValue::Float(b)) => a.to_bits() == b.to_bits(),
            (OwnValue::Double(a), OwnValue::Double(b)) => a.to_bits() == b.to_bits(),
            (OwnValue::ByteArray(a), OwnValue::ByteArray(b)) => a == b,
            (OwnValue::String(a), OwnValue::String(b)) => a == b,
            (OwnValue::List(a), OwnValue::List(b)) => a == b,
            (OwnValue::Compound(a), OwnValue::Compound(b)) => a == b,
            (OwnValue::IntArray(a), OwnValue::IntArray(b)) => a == b,
            (OwnValue::LongArray(a), OwnValue::LongArray(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for OwnValue {}

impl Hash for OwnValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag_id().hash(state);
        match self {
            OwnValue::Byte(value) => value.hash(state),
            OwnValue::Short(value) => value.hash(state),
            OwnValue::Int(value) => value.hash(state),
            OwnValue::Long(value) => value.hash(state),
            OwnValue::Float(value) => value.to_bits().hash(state),
            OwnValue::Double(value) => value.to_bits().hash(state),
            OwnValue::ByteArray(value) => value.hash(state),
            OwnValue::String(value) => value.hash(state),
            OwnValue::List(value) => value.hash(state),
            OwnValue::Compound(value) => value.hash(state),
            OwnValue::IntArray(value) => value.hash(state),
            OwnValue::LongArray(value) => value.hash(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_kind_aware_equality() {
        assert_ne!(OwnValue::Byte(0), OwnValue::Short(0));
        assert_ne!(OwnValue::Int(0), OwnValue::Long(0));
        assert_eq!(OwnValue::from("a"), OwnValue::String("a".into()));
        assert_ne!(OwnValue::ByteArray(vec![1]), OwnValue::List(OwnList::new()));
    }

    #[test]
    fn test_float_bits_equality_and_hash() {
        let nan = OwnValue::Double(f64::NAN);
        assert_eq!(nan, nan.clone());
        assert_ne!(OwnValue::Float(0.0), OwnValue::Float(-0.0));

        let set: HashSet<OwnValue> = [nan.clone(), nan, OwnValue::Float(1.0)].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_strict_accessors_do_not_widen() {
        let value = OwnValue::Short(5);
        assert_eq!(value.as_short(), Some(5));
        assert_eq!(value.as_int(), None);
        assert_eq!(value.as_long(), None);
        assert_eq!(value.as_number(), Some(Number::Short(5)));
        assert_eq!(OwnValue::from(true).as_bool(), Some(true));
        assert_eq!(OwnValue::String("x".into()).as_number(), None);
    }

    #[test]
    fn test_mut_accessors() {
        let mut value = OwnValue::IntArray(vec![1, 2]);
        value.as_int_array_mut().unwrap().push(3);
        assert_eq!(value.as_int_array(), Some(&[1, 2, 3][..]));
        assert!(value.as_long_array_mut().is_none());
    }
}
