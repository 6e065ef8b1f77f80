use std::fmt;

use crate::Error;

/// The kind of an NBT element, as identified by its type-tag byte.
///
/// The twelve concrete kinds and `End` carry their stable wire ids. `RootList`
/// is a pseudo-kind: Bedrock allows a bare list as the document root, and that
/// list carries no element count and always holds exactly one element. On the
/// wire it shares the id of [`TagID::List`]; it is only ever produced by the
/// reader for the very first type byte of a document.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum TagID {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
    LongArray = 12,
    RootList = 99,
}

impl TagID {
    /// Returns the byte written on the wire for this kind.
    ///
    /// ```
    /// use nbt_stream::TagID;
    ///
    /// assert_eq!(TagID::Compound.id(), 10);
    /// assert_eq!(TagID::RootList.id(), TagID::List.id());
    /// ```
    #[inline]
    pub const fn id(self) -> u8 {
        match self {
            Self::RootList => Self::List as u8,
            other => other as u8,
        }
    }

    /// Parses a wire type-tag byte. Ids past `LongArray` are rejected.
    ///
    /// ```
    /// use nbt_stream::TagID;
    ///
    /// assert_eq!(TagID::from_id(3), Some(TagID::Int));
    /// assert_eq!(TagID::from_id(13), None);
    /// ```
    #[inline]
    pub const fn from_id(id: u8) -> Option<Self> {
        Some(match id {
            0 => Self::End,
            1 => Self::Byte,
            2 => Self::Short,
            3 => Self::Int,
            4 => Self::Long,
            5 => Self::Float,
            6 => Self::Double,
            7 => Self::ByteArray,
            8 => Self::String,
            9 => Self::List,
            10 => Self::Compound,
            11 => Self::IntArray,
            12 => Self::LongArray,
            _ => return None,
        })
    }

    /// Returns `true` if this is a primitive tag type.
    ///
    /// Primitive tags are: End, Byte, Short, Int, Long, Float, Double.
    pub const fn is_primitive(self) -> bool {
        matches!(
            self,
            Self::End
                | Self::Byte
                | Self::Short
                | Self::Int
                | Self::Long
                | Self::Float
                | Self::Double
        )
    }

    /// Returns `true` for the six numeric kinds.
    pub const fn is_number(self) -> bool {
        matches!(
            self,
            Self::Byte | Self::Short | Self::Int | Self::Long | Self::Float | Self::Double
        )
    }

    /// Returns `true` if this is an array tag type.
    ///
    /// ```
    /// use nbt_stream::TagID;
    ///
    /// assert!(TagID::ByteArray.is_array());
    /// assert!(!TagID::List.is_array());
    /// ```
    pub const fn is_array(self) -> bool {
        matches!(self, Self::ByteArray | Self::IntArray | Self::LongArray)
    }

    /// Returns `true` if this is a composite tag type (List, RootList, Compound).
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::List | Self::RootList | Self::Compound)
    }

    /// The element kind of an array type, e.g. `Int` for `IntArray`.
    pub const fn array_element(self) -> Option<Self> {
        match self {
            Self::ByteArray => Some(Self::Byte),
            Self::IntArray => Some(Self::Int),
            Self::LongArray => Some(Self::Long),
            _ => None,
        }
    }

    /// The canonical `TAG_*` name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::End => "TAG_End",
            Self::Byte => "TAG_Byte",
            Self::Short => "TAG_Short",
            Self::Int => "TAG_Int",
            Self::Long => "TAG_Long",
            Self::Float => "TAG_Float",
            Self::Double => "TAG_Double",
            Self::ByteArray => "TAG_Byte_Array",
            Self::String => "TAG_String",
            Self::List => "TAG_List",
            Self::Compound => "TAG_Compound",
            Self::IntArray => "TAG_Int_Array",
            Self::LongArray => "TAG_Long_Array",
            Self::RootList => "TAG_Root_List",
        }
    }
}

impl TryFrom<u8> for TagID {
    type Error = Error;

    #[inline]
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_id(value).ok_or(Error::InvalidTagType(value))
    }
}

impl From<TagID> for u8 {
    #[inline]
    fn from(value: TagID) -> Self {
        value.id()
    }
}

impl fmt::Display for TagID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
