use std::fmt::{self, Display, Write};

use crate::{NbtDocument, Number, OwnValue, ReadableCompound, ReadableList, ReadableValue, Root, TagID};

/// Renders a value in the tree format used by wiki.vg:
///
/// ```text
/// TAG_Compound('hello world'): 1 entry
/// {
///   TAG_String('name'): 'Bananrama'
/// }
/// ```
///
/// Created by [`OwnValue::pretty`] and [`NbtDocument::pretty`].
pub struct Pretty<'a, V> {
    name: &'a str,
    value: &'a V,
}

impl OwnValue {
    /// A [`Display`] adapter that renders this value as a tree, under `name`.
    /// An empty name is shown as `None`.
    pub fn pretty<'a>(&'a self, name: &'a str) -> Pretty<'a, OwnValue> {
        Pretty { name, value: self }
    }
}

impl NbtDocument {
    /// Renders the whole document as a tree. A root list shows as a
    /// `TAG_List` holding its single element.
    pub fn pretty(&self) -> impl Display + '_ {
        DocumentPretty(self)
    }
}

struct DocumentPretty<'a>(&'a NbtDocument);

impl Display for DocumentPretty<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.root {
            Root::Compound(compound) => write_compound(f, &self.0.name, compound, 0),
            Root::List(list) => write_list(f, &self.0.name, list, 0),
        }
    }
}

impl<V: ReadableValue> Display for Pretty<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self.name, self.value, 0)
    }
}

fn entries(count: usize) -> String {
    if count == 1 {
        "1 entry".to_owned()
    } else {
        format!("{count} entries")
    }
}

fn header(f: &mut fmt::Formatter<'_>, tag: TagID, name: &str, depth: usize) -> fmt::Result {
    write!(f, "{:indent$}{tag}(", "", indent = depth * 2)?;
    if name.is_empty() {
        f.write_str("None")?;
    } else {
        write!(f, "'{name}'")?;
    }
    f.write_str("): ")
}

fn write_numbers<T: Display>(f: &mut fmt::Formatter<'_>, values: impl Iterator<Item = T>) -> fmt::Result {
    f.write_char('[')?;
    for (i, value) in values.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{value}")?;
    }
    f.write_str("]\n")
}

fn write_list<L: ReadableList>(f: &mut fmt::Formatter<'_>, name: &str, list: &L, depth: usize) -> fmt::Result {
    header(f, TagID::List, name, depth)?;
    writeln!(f, "{}", entries(list.len()))?;
    writeln!(f, "{:indent$}{{", "", indent = depth * 2)?;
    for item in list.iter() {
        write_value(f, "", item, depth + 1)?;
    }
    writeln!(f, "{:indent$}}}", "", indent = depth * 2)
}

fn write_compound<C: ReadableCompound>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    compound: &C,
    depth: usize,
) -> fmt::Result {
    header(f, TagID::Compound, name, depth)?;
    writeln!(f, "{}", entries(compound.len()))?;
    writeln!(f, "{:indent$}{{", "", indent = depth * 2)?;
    for (name, value) in compound.iter() {
        write_value(f, name, value, depth + 1)?;
    }
    writeln!(f, "{:indent$}}}", "", indent = depth * 2)
}

fn write_value<V: ReadableValue>(f: &mut fmt::Formatter<'_>, name: &str, value: &V, depth: usize) -> fmt::Result {
    if let Some(list) = value.list() {
        return write_list(f, name, list, depth);
    }
    if let Some(compound) = value.compound() {
        return write_compound(f, name, compound, depth);
    }
    header(f, value.tag_id(), name, depth)?;
    if let Some(number) = value.number() {
        return match number {
            Number::Float(v) => writeln!(f, "{v}"),
            Number::Double(v) => writeln!(f, "{v}"),
            other => writeln!(f, "{}", other.to_i64()),
        };
    }
    if let Some(string) = value.string() {
        return writeln!(f, "'{string}'");
    }
    if let Some(bytes) = value.byte_array() {
        return write_numbers(f, bytes.iter().map(|&b| b as i8));
    }
    if let Some(ints) = value.int_array() {
        return write_numbers(f, ints.iter());
    }
    if let Some(longs) = value.long_array() {
        return write_numbers(f, longs.iter());
    }
    f.write_char('\n')
}

#[cfg(test)]
mod tests {
    use crate::{OwnCompound, OwnList};

    use super::*;

    #[test]
    fn test_wiki_vg_layout() {
        let mut list = OwnList::new();
        list.push(1i64).unwrap();
        list.push(2i64).unwrap();
        let value = OwnValue::from(
            OwnCompound::new()
                .with("name", "Bananrama")
                .with("bytes", vec![0xFFu8, 1])
                .with("longs", list)
                .with("f", 0.5f32),
        );
        let expected = "\
TAG_Compound('hello world'): 4 entries
{
  TAG_String('name'): 'Bananrama'
  TAG_Byte_Array('bytes'): [-1, 1]
  TAG_List('longs'): 2 entries
  {
    TAG_Long(None): 1
    TAG_Long(None): 2
  }
  TAG_Float('f'): 0.5
}
";
        assert_eq!(value.pretty("hello world").to_string(), expected);
    }

    #[test]
    fn test_document_and_single_entry() {
        let doc = NbtDocument::list("", OwnCompound::new().with("x", 1i8));
        let expected = "\
TAG_List(None): 1 entry
{
  TAG_Compound(None): 1 entry
  {
    TAG_Byte('x'): 1
  }
}
";
        assert_eq!(doc.pretty().to_string(), expected);
    }
}
