use std::io::Write;

use crate::{
    Error, Format, NbtReader, NbtWriter, Number, OwnCompound, OwnList, OwnValue, ReadableCompound,
    ReadableList, ReadableValue, Result, Source, TagID,
};

/// Reads one value of kind `tag` from the reader's current position.
///
/// Inside a compound, `tag` is the type returned by
/// [`next_type`](NbtReader::next_type) and the entry name must already have
/// been read; inside a list it is the list's item type.
pub fn read_value<F: Format, R: Source>(reader: &mut NbtReader<F, R>, tag: TagID) -> Result<OwnValue> {
    Ok(match tag {
        TagID::Byte => OwnValue::Byte(reader.next_byte()?),
        TagID::Short => OwnValue::Short(reader.next_short()?),
        TagID::Int => OwnValue::Int(reader.next_int()?),
        TagID::Long => OwnValue::Long(reader.next_long()?),
        TagID::Float => OwnValue::Float(reader.next_float()?),
        TagID::Double => OwnValue::Double(reader.next_double()?),
        TagID::ByteArray => OwnValue::ByteArray(reader.next_byte_array()?),
        TagID::String => OwnValue::String(reader.next_string()?),
        TagID::IntArray => OwnValue::IntArray(reader.next_int_array()?),
        TagID::LongArray => OwnValue::LongArray(reader.next_long_array()?),
        TagID::List => {
            reader.begin_list()?;
            let list = read_items(reader)?;
            reader.end_list()?;
            OwnValue::List(list)
        }
        TagID::Compound => {
            reader.begin_compound()?;
            let compound = read_entries(reader)?;
            reader.end_compound()?;
            OwnValue::Compound(compound)
        }
        TagID::End | TagID::RootList => return Err(Error::InvalidTagType(tag.id())),
    })
}

fn read_items<F: Format, R: Source>(reader: &mut NbtReader<F, R>) -> Result<OwnList> {
    let item = reader.list_item_type()?;
    let mut list = OwnList::with_item_type(item);
    while reader.list_has_next()? {
        list.push(read_value(reader, item)?)?;
    }
    Ok(list)
}

fn read_entries<F: Format, R: Source>(reader: &mut NbtReader<F, R>) -> Result<OwnCompound> {
    let mut compound = OwnCompound::new();
    loop {
        let tag = reader.next_type()?;
        if tag == TagID::End {
            return Ok(compound);
        }
        let name = reader.next_name()?;
        let value = read_value(reader, tag)?;
        compound.insert(name, value);
    }
}

/// Writes one value at the writer's current position. Inside a compound the
/// entry name must already be staged with [`name`](NbtWriter::name).
pub fn write_value<F, W, V>(writer: &mut NbtWriter<F, W>, value: &V) -> Result<()>
where
    F: Format,
    W: Write,
    V: ReadableValue,
{
    if let Some(number) = value.number() {
        return match number {
            Number::Byte(v) => writer.byte(v),
            Number::Short(v) => writer.short(v),
            Number::Int(v) => writer.int(v),
            Number::Long(v) => writer.long(v),
            Number::Float(v) => writer.float(v),
            Number::Double(v) => writer.double(v),
        };
    }
    if let Some(string) = value.string() {
        return writer.string(string);
    }
    if let Some(bytes) = value.byte_array() {
        return writer.byte_array(bytes);
    }
    if let Some(ints) = value.int_array() {
        return writer.int_array(ints);
    }
    if let Some(longs) = value.long_array() {
        return writer.long_array(longs);
    }
    if let Some(list) = value.list() {
        writer.begin_typed_list(list.item_type())?;
        write_items(writer, list)?;
        return writer.end_list();
    }
    if let Some(compound) = value.compound() {
        writer.begin_compound()?;
        write_entries(writer, compound)?;
        return writer.end_compound();
    }
    Err(Error::InvalidTagType(value.tag_id().id()))
}

fn write_items<F: Format, W: Write, L: ReadableList>(writer: &mut NbtWriter<F, W>, list: &L) -> Result<()> {
    for item in list.iter() {
        write_value(writer, item)?;
    }
    Ok(())
}

fn write_entries<F: Format, W: Write, C: ReadableCompound>(
    writer: &mut NbtWriter<F, W>,
    compound: &C,
) -> Result<()> {
    for (name, value) in compound.iter() {
        writer.name(name)?;
        write_value(writer, value)?;
    }
    Ok(())
}

/// The top-level value of a document.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Root {
    Compound(OwnCompound),
    /// A root list. On the wire it carries exactly one element and no count.
    List(OwnList),
}

/// A complete NBT document: the root value and its name.
///
/// ```
/// use nbt_stream::{BEDROCK, NbtDocument, OwnCompound};
///
/// let doc = NbtDocument::compound("level", OwnCompound::new().with("seed", 42i64));
/// let bytes = doc.to_vec(BEDROCK)?;
/// assert_eq!(NbtDocument::from_slice(BEDROCK, &bytes)?, doc);
/// # Ok::<(), nbt_stream::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NbtDocument {
    pub name: String,
    pub root: Root,
}

impl NbtDocument {
    pub fn compound(name: impl Into<String>, compound: OwnCompound) -> Self {
        Self {
            name: name.into(),
            root: Root::Compound(compound),
        }
    }

    /// A document whose root is a list holding the single `element`.
    pub fn list(name: impl Into<String>, element: impl Into<OwnValue>) -> Self {
        Self {
            name: name.into(),
            root: Root::List(OwnList::single(element.into())),
        }
    }

    pub fn as_compound(&self) -> Option<&OwnCompound> {
        match &self.root {
            Root::Compound(compound) => Some(compound),
            Root::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&OwnList> {
        match &self.root {
            Root::List(list) => Some(list),
            Root::Compound(_) => None,
        }
    }

    pub fn from_slice<F: Format>(format: F, bytes: &[u8]) -> Result<Self> {
        read_document(format, bytes)
    }

    pub fn to_vec<F: Format>(&self, format: F) -> Result<Vec<u8>> {
        write_document(format, Vec::new(), self)
    }
}

/// Reads a whole document whose root is a compound or a root list.
pub fn read_document<F: Format, R: Source>(format: F, source: R) -> Result<NbtDocument> {
    let mut reader = NbtReader::new(format, source);
    match reader.next_type()? {
        TagID::Compound => {
            let name = reader.next_name()?;
            reader.begin_compound()?;
            let compound = read_entries(&mut reader)?;
            reader.end_compound()?;
            Ok(NbtDocument {
                name,
                root: Root::Compound(compound),
            })
        }
        TagID::RootList => {
            let name = reader.next_name()?;
            reader.begin_root_list()?;
            let list = read_items(&mut reader)?;
            reader.end_root_list()?;
            Ok(NbtDocument {
                name,
                root: Root::List(list),
            })
        }
        other => Err(Error::InvalidRoot(other)),
    }
}

/// Writes `document` to `sink` and returns the sink.
pub fn write_document<F: Format, W: Write>(format: F, sink: W, document: &NbtDocument) -> Result<W> {
    let mut writer = NbtWriter::new(format, sink);
    writer.name(&document.name)?;
    match &document.root {
        Root::Compound(compound) => {
            writer.begin_compound()?;
            write_entries(&mut writer, compound)?;
            writer.end_compound()?;
        }
        Root::List(list) => {
            writer.begin_typed_list(list.item_type())?;
            write_items(&mut writer, list)?;
            writer.end_list()?;
        }
    }
    writer.finish()
}
