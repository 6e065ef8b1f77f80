use crate::{Error, OwnValue, Result, TagID};

/// A homogeneous, ordered sequence of tag values.
///
/// The list records one item type. A new list starts at `End`, which accepts
/// any first element; from then on the item type is pinned for the life of
/// the list, even if it is emptied again. Adding an element of another kind
/// fails with [`Error::TagMismatch`].
///
/// `get_mut` and `iter_mut` hand out plain `&mut OwnValue`s for editing
/// nested containers in place; replacing an element with one of a different
/// kind through them breaks the list, and writing it then fails.
///
/// ```
/// use nbt_stream::{OwnList, OwnValue, TagID};
///
/// let mut list = OwnList::new();
/// list.push(1i32)?;
/// list.push(2i32)?;
/// assert_eq!(list.item_type(), TagID::Int);
/// assert!(list.push(3i16).is_err());
/// assert_eq!(list.len(), 2);
/// # Ok::<(), nbt_stream::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OwnList {
    item: TagID,
    items: Vec<OwnValue>,
}

impl Default for OwnList {
    fn default() -> Self {
        Self::new()
    }
}

impl OwnList {
    #[inline]
    pub const fn new() -> Self {
        Self {
            item: TagID::End,
            items: Vec::new(),
        }
    }

    /// Creates an empty list whose item type is already pinned.
    #[inline]
    pub const fn with_item_type(item: TagID) -> Self {
        Self {
            item,
            items: Vec::new(),
        }
    }

    pub(crate) fn single(value: OwnValue) -> Self {
        Self {
            item: value.tag_id(),
            items: vec![value],
        }
    }

    /// Builds a list from values that must all share one kind.
    pub fn from_values(values: impl IntoIterator<Item = OwnValue>) -> Result<Self> {
        let mut list = Self::new();
        for value in values {
            list.push(value)?;
        }
        Ok(list)
    }

    #[inline]
    pub fn item_type(&self) -> TagID {
        self.item
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn check(&mut self, tag: TagID) -> Result<()> {
        if self.item == TagID::End {
            self.item = tag;
        } else if self.item != tag {
            return Err(Error::TagMismatch {
                expected: self.item,
                actual: tag,
            });
        }
        Ok(())
    }

    /// Appends a value, pinning the item type if this is the first element.
    pub fn push(&mut self, value: impl Into<OwnValue>) -> Result<()> {
        let value = value.into();
        self.check(value.tag_id())?;
        self.items.push(value);
        Ok(())
    }

    /// Inserts a value at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: impl Into<OwnValue>) -> Result<()> {
        let value = value.into();
        self.check(value.tag_id())?;
        self.items.insert(index, value);
        Ok(())
    }

    /// Replaces the element at `index`, returning the old one.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, value: impl Into<OwnValue>) -> Result<OwnValue> {
        let value = value.into();
        self.check(value.tag_id())?;
        Ok(std::mem::replace(&mut self.items[index], value))
    }

    /// Removes and returns the element at `index`. The item type stays pinned.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> OwnValue {
        self.items.remove(index)
    }

    #[inline]
    pub fn pop(&mut self) -> Option<OwnValue> {
        self.items.pop()
    }

    /// Removes every element. The item type stays pinned.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&OwnValue> {
        self.items.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut OwnValue> {
        self.items.get_mut(index)
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, OwnValue> {
        self.items.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, OwnValue> {
        self.items.iter_mut()
    }

    #[inline]
    pub fn as_slice(&self) -> &[OwnValue] {
        &self.items
    }

    #[inline]
    pub fn into_vec(self) -> Vec<OwnValue> {
        self.items
    }
}

impl TryFrom<Vec<OwnValue>> for OwnList {
    type Error = Error;

    fn try_from(values: Vec<OwnValue>) -> Result<Self> {
        Self::from_values(values)
    }
}

impl IntoIterator for OwnList {
    type Item = OwnValue;
    type IntoIter = std::vec::IntoIter<OwnValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a OwnList {
    type Item = &'a OwnValue;
    type IntoIter = std::slice::Iter<'a, OwnValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
