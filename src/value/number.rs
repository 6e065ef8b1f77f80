use crate::TagID;

/// One of the six numeric kinds, read without committing to a width.
///
/// This is the lenient accessor: [`OwnValue::as_number`](crate::OwnValue::as_number)
/// and [`OwnCompound::get_number`](crate::OwnCompound::get_number) accept any
/// numeric kind, and the `to_*` conversions narrow or widen the way Java's
/// primitive casts do (integers wrap, floats truncate toward zero and
/// saturate, NaN becomes zero). The strict getters such as
/// [`OwnValue::as_int`](crate::OwnValue::as_int) never convert.
///
/// ```
/// use nbt_stream::{Number, OwnValue};
///
/// let stored = OwnValue::Byte(-3);
/// assert_eq!(stored.as_int(), None);
/// assert_eq!(stored.as_number().map(Number::to_i32), Some(-3));
/// assert_eq!(Number::Int(300).to_i8(), 44);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

impl Number {
    pub const fn tag_id(self) -> TagID {
        match self {
            Number::Byte(_) => TagID::Byte,
            Number::Short(_) => TagID::Short,
            Number::Int(_) => TagID::Int,
            Number::Long(_) => TagID::Long,
            Number::Float(_) => TagID::Float,
            Number::Double(_) => TagID::Double,
        }
    }

    /// Returns `true` for `Float` and `Double`.
    pub const fn is_floating(self) -> bool {
        matches!(self, Number::Float(_) | Number::Double(_))
    }

    // Floats narrow to `i8`/`i16` through `i32`, as a Java cast does.
    pub fn to_i8(self) -> i8 {
        match self {
            Number::Byte(v) => v,
            Number::Short(v) => v as i8,
            Number::Int(v) => v as i8,
            Number::Long(v) => v as i8,
            Number::Float(v) => v as i32 as i8,
            Number::Double(v) => v as i32 as i8,
        }
    }

    pub fn to_i16(self) -> i16 {
        match self {
            Number::Byte(v) => v as i16,
            Number::Short(v) => v,
            Number::Int(v) => v as i16,
            Number::Long(v) => v as i16,
            Number::Float(v) => v as i32 as i16,
            Number::Double(v) => v as i32 as i16,
        }
    }

    pub fn to_i32(self) -> i32 {
        match self {
            Number::Byte(v) => v as i32,
            Number::Short(v) => v as i32,
            Number::Int(v) => v,
            Number::Long(v) => v as i32,
            Number::Float(v) => v as i32,
            Number::Double(v) => v as i32,
        }
    }

    pub fn to_i64(self) -> i64 {
        match self {
            Number::Byte(v) => v as i64,
            Number::Short(v) => v as i64,
            Number::Int(v) => v as i64,
            Number::Long(v) => v,
            Number::Float(v) => v as i64,
            Number::Double(v) => v as i64,
        }
    }

    pub fn to_f32(self) -> f32 {
        match self {
            Number::Byte(v) => v as f32,
            Number::Short(v) => v as f32,
            Number::Int(v) => v as f32,
            Number::Long(v) => v as f32,
            Number::Float(v) => v,
            Number::Double(v) => v as f32,
        }
    }

    pub fn to_f64(self) -> f64 {
        match self {
            Number::Byte(v) => v as f64,
            Number::Short(v) => v as f64,
            Number::Int(v) => v as f64,
            Number::Long(v) => v as f64,
            Number::Float(v) => v as f64,
            Number::Double(v) => v,
        }
    }
}
