use crate::{Number, OwnCompound, OwnList, OwnValue, TagID};

/// Read-only access to a tag value.
///
/// The tree writer, the pretty printer and the serde bridge are written
/// against these traits rather than against [`OwnValue`] directly, so any
/// tree that can answer them can be written out.
pub trait ReadableValue {
    type List: ReadableList<Value = Self>;
    type Compound: ReadableCompound<Value = Self>;

    fn tag_id(&self) -> TagID;

    /// Any numeric kind. `None` for strings, arrays and containers.
    fn number(&self) -> Option<Number>;

    fn string(&self) -> Option<&str>;

    fn byte_array(&self) -> Option<&[u8]>;

    fn int_array(&self) -> Option<&[i32]>;

    fn long_array(&self) -> Option<&[i64]>;

    fn list(&self) -> Option<&Self::List>;

    fn compound(&self) -> Option<&Self::Compound>;
}

/// Read-only access to a list.
pub trait ReadableList {
    type Value: ReadableValue;

    fn item_type(&self) -> TagID;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Option<&Self::Value>;

    fn iter(&self) -> impl Iterator<Item = &Self::Value>;
}

/// Read-only access to a compound, in entry order.
pub trait ReadableCompound {
    type Value: ReadableValue;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, name: &str) -> Option<&Self::Value>;

    fn iter(&self) -> impl Iterator<Item = (&str, &Self::Value)>;
}

impl ReadableValue for OwnValue {
    type List = OwnList;
    type Compound = OwnCompound;

    #[inline]
    fn tag_id(&self) -> TagID {
        OwnValue::tag_id(self)
    }

    #[inline]
    fn number(&self) -> Option<Number> {
        self.as_number()
    }

    #[inline]
    fn string(&self) -> Option<&str> {
        self.as_string()
    }

    #[inline]
    fn byte_array(&self) -> Option<&[u8]> {
        self.as_byte_array()
    }

    #[inline]
    fn int_array(&self) -> Option<&[i32]> {
        self.as_int_array()
    }

    #[inline]
    fn long_array(&self) -> Option<&[i64]> {
        self.as_long_array()
    }

    #[inline]
    fn list(&self) -> Option<&OwnList> {
        self.as_list()
    }

    #[inline]
    fn compound(&self) -> Option<&OwnCompound> {
        self.as_compound()
    }
}

impl ReadableList for OwnList {
    type Value = OwnValue;

    #[inline]
    fn item_type(&self) -> TagID {
        OwnList::item_type(self)
    }

    #[inline]
    fn len(&self) -> usize {
        OwnList::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&OwnValue> {
        OwnList::get(self, index)
    }

    fn iter(&self) -> impl Iterator<Item = &OwnValue> {
        OwnList::iter(self)
    }
}

impl ReadableCompound for OwnCompound {
    type Value = OwnValue;

    #[inline]
    fn len(&self) -> usize {
        OwnCompound::len(self)
    }

    #[inline]
    fn get(&self, name: &str) -> Option<&OwnValue> {
        OwnCompound::get(self, name)
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &OwnValue)> {
        OwnCompound::iter(self).map(|(name, value)| (name.as_str(), value))
    }
}
