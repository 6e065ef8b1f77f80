use std::hash::{DefaultHasher, Hash, Hasher};

use indexmap::IndexMap;

use crate::{Number, OwnList, OwnValue, TagID};

/// An insertion-ordered map from names to tag values.
///
/// Inserting an existing name replaces its value in place (keeping the
/// original position); removing a name keeps the order of the rest.
/// Equality ignores order, as it does for any map.
///
/// ```
/// use nbt_stream::{OwnCompound, TagID};
///
/// let compound = OwnCompound::new()
///     .with("name", "Bananrama")
///     .with("health", 20.0f32);
/// assert_eq!(compound.get_string("name"), Some("Bananrama"));
/// assert!(compound.contains_type("health", TagID::Float));
/// assert_eq!(compound.keys().collect::<Vec<_>>(), ["name", "health"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OwnCompound {
    entries: IndexMap<String, OwnValue>,
}

macro_rules! typed_getter {
    ($($name:ident => $accessor:ident: $ty:ty),* $(,)?) => {
        $(
            #[inline]
            pub fn $name(&self, name: &str) -> Option<$ty> {
                self.entries.get(name)?.$accessor()
            }
        )*
    };
}

impl OwnCompound {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Inserts or replaces an entry and returns the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<OwnValue>) -> Option<OwnValue> {
        self.entries.insert(name.into(), value.into())
    }

    /// Chainable [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<OwnValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<OwnValue> {
        self.entries.shift_remove(name)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&OwnValue> {
        self.entries.get(name)
    }

    #[inline]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut OwnValue> {
        self.entries.get_mut(name)
    }

    typed_getter! {
        get_byte => as_byte: i8,
        get_bool => as_bool: bool,
        get_short => as_short: i16,
        get_int => as_int: i32,
        get_long => as_long: i64,
        get_float => as_float: f32,
        get_double => as_double: f64,
        get_byte_array => as_byte_array: &[u8],
        get_string => as_string: &str,
        get_list => as_list: &OwnList,
        get_compound => as_compound: &OwnCompound,
        get_int_array => as_int_array: &[i32],
        get_long_array => as_long_array: &[i64],
        get_number => as_number: Number,
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns `true` if `name` holds a value of exactly kind `tag`.
    pub fn contains_type(&self, name: &str, tag: TagID) -> bool {
        self.entries.get(name).is_some_and(|value| value.tag_id() == tag)
    }

    /// Returns `true` if `name` holds any of the six numeric kinds.
    pub fn contains_number(&self, name: &str) -> bool {
        self.entries.get(name).is_some_and(|value| value.tag_id().is_number())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[inline]
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, OwnValue> {
        self.entries.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, String, OwnValue> {
        self.entries.iter_mut()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[inline]
    pub fn values(&self) -> indexmap::map::Values<'_, String, OwnValue> {
        self.entries.values()
    }
}

impl Hash for OwnCompound {
    // Order-independent, to agree with map equality.
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut sum = 0u64;
        for entry in &self.entries {
            let mut hasher = DefaultHasher::new();
            entry.hash(&mut hasher);
            sum = sum.wrapping_add(hasher.finish());
        }
        self.entries.len().hash(state);
        sum.hash(state);
    }
}

impl<K: Into<String>, V: Into<OwnValue>> FromIterator<(K, V)> for OwnCompound {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<OwnValue>> Extend<(K, V)> for OwnCompound {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl IntoIterator for OwnCompound {
    type Item = (String, OwnValue);
    type IntoIter = indexmap::map::IntoIter<String, OwnValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a OwnCompound {
    type Item = (&'a String, &'a OwnValue);
    type IntoIter = indexmap::map::Iter<'a, String, OwnValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash_of(value: &impl Hash) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut compound = OwnCompound::new().with("a", 1i32).with("b", 2i32);
        assert_eq!(compound.insert("a", 3i32), Some(OwnValue::Int(1)));
        assert_eq!(compound.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(compound.get_int("a"), Some(3));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut compound: OwnCompound = [("x", 1i8), ("y", 2i8), ("z", 3i8)].into_iter().collect();
        assert_eq!(compound.remove("x"), Some(OwnValue::Byte(1)));
        assert_eq!(compound.keys().collect::<Vec<_>>(), ["y", "z"]);
        assert_eq!(compound.remove("x"), None);
    }

    #[test]
    fn test_number_queries_are_separate_from_strict_getters() {
        let compound = OwnCompound::new().with("b", 5i8).with("s", "5");
        assert_eq!(compound.get_int("b"), None);
        assert_eq!(compound.get_number("b").map(Number::to_i32), Some(5));
        assert!(compound.contains_number("b"));
        assert!(!compound.contains_number("s"));
        assert!(!compound.contains_number("missing"));
        assert!(compound.contains_type("b", TagID::Byte));
        assert!(!compound.contains_type("b", TagID::Int));
    }

    #[test]
    fn test_equality_and_hash_ignore_order() {
        let a = OwnCompound::new().with("x", 1i32).with("y", "z");
        let b = OwnCompound::new().with("y", "z").with("x", 1i32);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, OwnCompound::new().with("x", 1i64).with("y", "z"));
    }

    #[test]
    fn test_empty_name_is_a_key() {
        let compound = OwnCompound::new().with("", OwnCompound::new());
        assert!(compound.get_compound("").is_some_and(OwnCompound::is_empty));
    }
}
