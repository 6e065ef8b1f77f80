use crate::OwnValue;

mod private {
    pub trait Sealed {}
    impl Sealed for usize {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl<T> Sealed for &T where T: ?Sized + Sealed {}
}

/// Something that can look up a child of an [`OwnValue`]: a `usize` position
/// in a list, or a `&str`/`String` key in a compound.
///
/// ```
/// use nbt_stream::{OwnCompound, OwnValue};
///
/// let value = OwnValue::from(OwnCompound::new().with("hp", 20i16));
/// assert_eq!(value.get("hp").and_then(OwnValue::as_short), Some(20));
/// assert!(value.get(0).is_none());
/// ```
pub trait Index: private::Sealed {
    #[doc(hidden)]
    fn index_into<'v>(&self, value: &'v OwnValue) -> Option<&'v OwnValue>;

    #[doc(hidden)]
    fn index_into_mut<'v>(&self, value: &'v mut OwnValue) -> Option<&'v mut OwnValue>;
}

impl Index for usize {
    #[inline]
    fn index_into<'v>(&self, value: &'v OwnValue) -> Option<&'v OwnValue> {
        value.as_list()?.get(*self)
    }

    #[inline]
    fn index_into_mut<'v>(&self, value: &'v mut OwnValue) -> Option<&'v mut OwnValue> {
        value.as_list_mut()?.get_mut(*self)
    }
}

impl Index for str {
    #[inline]
    fn index_into<'v>(&self, value: &'v OwnValue) -> Option<&'v OwnValue> {
        value.as_compound()?.get(self)
    }

    #[inline]
    fn index_into_mut<'v>(&self, value: &'v mut OwnValue) -> Option<&'v mut OwnValue> {
        value.as_compound_mut()?.get_mut(self)
    }
}

impl Index for String {
    #[inline]
    fn index_into<'v>(&self, value: &'v OwnValue) -> Option<&'v OwnValue> {
        self.as_str().index_into(value)
    }

    #[inline]
    fn index_into_mut<'v>(&self, value: &'v mut OwnValue) -> Option<&'v mut OwnValue> {
        self.as_str().index_into_mut(value)
    }
}

impl<T: ?Sized + Index> Index for &T {
    #[inline]
    fn index_into<'v>(&self, value: &'v OwnValue) -> Option<&'v OwnValue> {
        (**self).index_into(value)
    }

    #[inline]
    fn index_into_mut<'v>(&self, value: &'v mut OwnValue) -> Option<&'v mut OwnValue> {
        (**self).index_into_mut(value)
    }
}
