use std::io::{self, Write};

use crate::{Error, Format, Result, TagID, codec::mutf8};

/// Where the bytes of the innermost frame go.
enum Target<'a, W> {
    Sink(&'a mut W),
    Buffer(&'a mut Vec<u8>),
}

impl<W: Write> Write for Target<'_, W> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Target::Sink(sink) => sink.write(buf),
            Target::Buffer(buffer) => {
                buffer.extend_from_slice(buf);
                Ok(buf.len())
            }
        }
    }

    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Target::Sink(sink) => sink.write_all(buf),
            Target::Buffer(buffer) => {
                buffer.extend_from_slice(buf);
                Ok(())
            }
        }
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        match self {
            Target::Sink(sink) => sink.flush(),
            Target::Buffer(_) => Ok(()),
        }
    }
}

/// One open container. Everything written inside it is held in `buffer`
/// until the container closes and its size is known, except for the root
/// compound, which is `direct`.
struct Frame {
    kind: TagID,
    item: Option<TagID>,
    count: usize,
    buffer: Vec<u8>,
    direct: bool,
}

/// What [`NbtWriter::value`] handed back: the stream to put the payload on,
/// and whether a bulk array call should append its elements to the enclosing
/// sequence instead of writing a complete array value.
struct Slot<'a, W> {
    out: Target<'a, W>,
    append: bool,
}

#[inline]
fn target<'a, W>(frame: &'a mut Frame, sink: &'a mut W) -> Target<'a, W> {
    if frame.direct {
        Target::Sink(sink)
    } else {
        Target::Buffer(&mut frame.buffer)
    }
}

/// A push cursor that writes an NBT document to a byte sink.
///
/// Lists and arrays take their elements one call at a time; their item type
/// and element count are resolved when they close. Each open container
/// buffers its own bytes and hands them to its parent on close, so a
/// container's header, count and body always reach the sink in order and
/// only once. The root compound's body is the one place bytes go straight to
/// the sink.
///
/// A document is a single named root: stage the name with
/// [`name`](Self::name), then open a compound, or open a list that will hold
/// exactly one element (Bedrock's root list).
///
/// # Example
///
/// ```
/// use nbt_stream::{JAVA, NbtWriter};
///
/// let mut writer = NbtWriter::new(JAVA, Vec::new());
/// writer.name("")?;
/// writer.begin_compound()?;
/// writer.name("xs")?;
/// writer.begin_list()?;
/// writer.short(1)?;
/// writer.short(2)?;
/// writer.end_list()?;
/// writer.end_compound()?;
/// let bytes = writer.finish()?;
/// assert_eq!(
///     bytes,
///     [0x0A, 0, 0, 0x09, 0, 2, b'x', b's', 0x02, 0, 0, 0, 2, 0, 1, 0, 2, 0x00]
/// );
/// # Ok::<(), nbt_stream::Error>(())
/// ```
pub struct NbtWriter<F, W> {
    format: F,
    sink: W,
    stack: Vec<Frame>,
    name: Option<Vec<u8>>,
    spare: Vec<Vec<u8>>,
    done: bool,
}

impl<F: Format, W: Write> NbtWriter<F, W> {
    pub fn new(format: F, sink: W) -> Self {
        Self {
            format,
            sink,
            stack: Vec::new(),
            name: None,
            spare: Vec::new(),
            done: false,
        }
    }

    #[inline]
    pub fn format(&self) -> F {
        self.format
    }

    #[inline]
    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Number of open containers.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns `true` once the root value has been closed.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.done
    }

    /// Checks that the root value was written and closed, flushes the sink
    /// and returns it.
    pub fn finish(mut self) -> Result<W> {
        if let Some(frame) = self.stack.last() {
            return Err(Error::Unterminated(frame.kind));
        }
        if !self.done {
            return Err(Error::NoRoot);
        }
        self.sink.flush()?;
        Ok(self.sink)
    }

    fn encode(&self, text: &str) -> Result<Vec<u8>> {
        let bytes = mutf8::encode(text);
        if bytes.len() > self.format.max_utf_length() {
            return Err(Error::StringTooLong(bytes.len()));
        }
        Ok(bytes.into_owned())
    }

    /// Stages the name of the next value. Only compound entries and the root
    /// carry names.
    pub fn name(&mut self, name: &str) -> Result<()> {
        match self.stack.last() {
            None if self.done => return Err(Error::DocumentComplete),
            Some(frame) if frame.kind != TagID::Compound => return Err(Error::NameNotAllowed),
            _ => {}
        }
        self.name = Some(self.encode(name)?);
        Ok(())
    }

    /// Claims the slot for one value of kind `tag` in the innermost container
    /// and writes what precedes its payload there.
    ///
    /// `elements` is set by the bulk array calls: inside a `Byte`/`Int`/`Long`
    /// sequence such a call adds that many elements to the sequence rather
    /// than one array value.
    fn value(&mut self, tag: TagID, elements: Option<usize>) -> Result<Slot<'_, W>> {
        let format = self.format;
        let Some(frame) = self.stack.last_mut() else {
            return Err(if self.done {
                Error::DocumentComplete
            } else {
                Error::InvalidRoot(tag)
            });
        };
        let mut append = false;
        match frame.kind {
            TagID::Compound => {
                let name = self.name.take().ok_or(Error::MissingName)?;
                let mut out = target(frame, &mut self.sink);
                out.write_all(&[tag.id()])?;
                format.write_utf_length(&mut out, name.len())?;
                out.write_all(&name)?;
            }
            TagID::List | TagID::RootList => {
                let added = match (elements, frame.item) {
                    (Some(n), Some(item)) if tag.array_element() == Some(item) => {
                        append = true;
                        n
                    }
                    (_, Some(item)) if item != tag => {
                        return Err(Error::TagMismatch {
                            expected: item,
                            actual: tag,
                        });
                    }
                    _ => 1,
                };
                if frame.kind == TagID::RootList && frame.count + added > 1 {
                    return Err(Error::RootListLength(frame.count + added));
                }
                frame.item = Some(tag.array_element().filter(|_| append).unwrap_or(tag));
                frame.count += added;
            }
            kind => {
                let item = kind.array_element().unwrap_or(TagID::End);
                match elements {
                    _ if tag == item => frame.count += 1,
                    Some(n) if tag.array_element() == Some(item) => {
                        append = true;
                        frame.count += n;
                    }
                    _ => {
                        return Err(Error::TagMismatch {
                            expected: item,
                            actual: tag,
                        });
                    }
                }
            }
        }
        Ok(Slot {
            out: target(frame, &mut self.sink),
            append,
        })
    }

    fn push(&mut self, kind: TagID, item: Option<TagID>, direct: bool) {
        let buffer = self.spare.pop().unwrap_or_default();
        self.stack.push(Frame {
            kind,
            item,
            count: 0,
            buffer,
            direct,
        });
    }

    /// Opens the root: writes its type byte and name straight to the sink.
    fn begin_root(&mut self, kind: TagID, item: Option<TagID>) -> Result<()> {
        if self.done {
            return Err(Error::DocumentComplete);
        }
        let name = self.name.take().ok_or(Error::MissingName)?;
        self.sink.write_all(&[kind.id()])?;
        self.format.write_utf_length(&mut self.sink, name.len())?;
        self.sink.write_all(&name)?;
        tracing::trace!(kind = %kind, "root");
        self.push(kind, item, kind == TagID::Compound);
        Ok(())
    }

    fn begin(&mut self, kind: TagID, item: Option<TagID>) -> Result<()> {
        if self.stack.is_empty() {
            return match kind {
                TagID::Compound => self.begin_root(TagID::Compound, None),
                TagID::List => self.begin_root(TagID::RootList, item),
                other => Err(if self.done {
                    Error::DocumentComplete
                } else {
                    Error::InvalidRoot(other)
                }),
            };
        }
        self.value(kind, None)?;
        self.push(kind, item, false);
        Ok(())
    }

    /// Closes the innermost container and hands its bytes to the parent.
    fn end(&mut self, kind: TagID) -> Result<()> {
        let open = match self.stack.last() {
            Some(frame) if frame.kind == kind => frame.kind,
            Some(frame) if kind == TagID::List && frame.kind == TagID::RootList => frame.kind,
            _ => return Err(Error::NotInContainer(kind)),
        };
        let Some(mut frame) = self.stack.pop() else {
            return Err(Error::NotInContainer(kind));
        };
        if open == TagID::RootList && frame.count != 1 {
            let count = frame.count;
            self.stack.push(frame);
            return Err(Error::RootListLength(count));
        }
        self.name = None;

        let format = self.format;
        let mut out = match self.stack.last_mut() {
            Some(parent) => target(parent, &mut self.sink),
            None => Target::Sink(&mut self.sink),
        };
        tracing::trace!(
            kind = %open,
            count = frame.count,
            bytes = frame.buffer.len(),
            "flush"
        );
        match open {
            TagID::Compound => {
                out.write_all(&frame.buffer)?;
                out.write_all(&[TagID::End.id()])?;
            }
            TagID::RootList => {
                out.write_all(&[frame.item.unwrap_or(TagID::End).id()])?;
                out.write_all(&frame.buffer)?;
            }
            TagID::List => {
                let count = i32::try_from(frame.count).map_err(|_| Error::ListTooLong(frame.count))?;
                out.write_all(&[frame.item.unwrap_or(TagID::End).id()])?;
                format.write_int(&mut out, count)?;
                out.write_all(&frame.buffer)?;
            }
            _ => {
                let count = i32::try_from(frame.count).map_err(|_| Error::ListTooLong(frame.count))?;
                format.write_int(&mut out, count)?;
                out.write_all(&frame.buffer)?;
            }
        }

        frame.buffer.clear();
        self.spare.push(frame.buffer);
        if self.stack.is_empty() {
            self.done = true;
        }
        Ok(())
    }

    pub fn begin_compound(&mut self) -> Result<()> {
        self.begin(TagID::Compound, None)
    }

    pub fn end_compound(&mut self) -> Result<()> {
        self.end(TagID::Compound)
    }

    /// Opens a list whose item type is taken from its first element. An empty
    /// list is written with item type `End`. At the root this opens the root
    /// list.
    pub fn begin_list(&mut self) -> Result<()> {
        self.begin(TagID::List, None)
    }

    /// Opens a list with its item type pinned up front. `End` leaves the item
    /// type unpinned, as [`begin_list`](Self::begin_list) does.
    pub fn begin_typed_list(&mut self, item: TagID) -> Result<()> {
        match item {
            TagID::RootList => Err(Error::TagMismatch {
                expected: TagID::List,
                actual: item,
            }),
            TagID::End => self.begin(TagID::List, None),
            _ => self.begin(TagID::List, Some(item)),
        }
    }

    /// Closes the innermost list, or the root list.
    pub fn end_list(&mut self) -> Result<()> {
        self.end(TagID::List)
    }

    pub fn begin_byte_array(&mut self) -> Result<()> {
        self.begin(TagID::ByteArray, Some(TagID::Byte))
    }

    pub fn end_byte_array(&mut self) -> Result<()> {
        self.end(TagID::ByteArray)
    }

    pub fn begin_int_array(&mut self) -> Result<()> {
        self.begin(TagID::IntArray, Some(TagID::Int))
    }

    pub fn end_int_array(&mut self) -> Result<()> {
        self.end(TagID::IntArray)
    }

    pub fn begin_long_array(&mut self) -> Result<()> {
        self.begin(TagID::LongArray, Some(TagID::Long))
    }

    pub fn end_long_array(&mut self) -> Result<()> {
        self.end(TagID::LongArray)
    }

    pub fn byte(&mut self, value: i8) -> Result<()> {
        let mut slot = self.value(TagID::Byte, None)?;
        Ok(slot.out.write_all(&[value as u8])?)
    }

    #[inline]
    pub fn bool(&mut self, value: bool) -> Result<()> {
        self.byte(value as i8)
    }

    pub fn short(&mut self, value: i16) -> Result<()> {
        let format = self.format;
        let mut slot = self.value(TagID::Short, None)?;
        format.write_short(&mut slot.out, value)
    }

    pub fn int(&mut self, value: i32) -> Result<()> {
        let format = self.format;
        let mut slot = self.value(TagID::Int, None)?;
        format.write_int(&mut slot.out, value)
    }

    pub fn long(&mut self, value: i64) -> Result<()> {
        let format = self.format;
        let mut slot = self.value(TagID::Long, None)?;
        format.write_long(&mut slot.out, value)
    }

    pub fn float(&mut self, value: f32) -> Result<()> {
        let format = self.format;
        let mut slot = self.value(TagID::Float, None)?;
        format.write_float(&mut slot.out, value)
    }

    pub fn double(&mut self, value: f64) -> Result<()> {
        let format = self.format;
        let mut slot = self.value(TagID::Double, None)?;
        format.write_double(&mut slot.out, value)
    }

    pub fn string(&mut self, value: &str) -> Result<()> {
        let format = self.format;
        let bytes = self.encode(value)?;
        let mut slot = self.value(TagID::String, None)?;
        format.write_utf_length(&mut slot.out, bytes.len())?;
        Ok(slot.out.write_all(&bytes)?)
    }

    fn array(&mut self, tag: TagID, len: usize) -> Result<Slot<'_, W>> {
        let count = i32::try_from(len).map_err(|_| Error::ListTooLong(len))?;
        let format = self.format;
        let mut slot = self.value(tag, Some(len))?;
        if !slot.append {
            format.write_int(&mut slot.out, count)?;
        }
        Ok(slot)
    }

    /// Writes a `ByteArray` value, or appends the bytes to an enclosing
    /// `Byte` list or byte array.
    pub fn byte_array(&mut self, values: &[u8]) -> Result<()> {
        let mut slot = self.array(TagID::ByteArray, values.len())?;
        Ok(slot.out.write_all(values)?)
    }

    /// Writes an `IntArray` value, or appends to an enclosing `Int` list or
    /// int array.
    pub fn int_array(&mut self, values: &[i32]) -> Result<()> {
        let format = self.format;
        let mut slot = self.array(TagID::IntArray, values.len())?;
        for &value in values {
            format.write_int(&mut slot.out, value)?;
        }
        Ok(())
    }

    /// Writes a `LongArray` value, or appends to an enclosing `Long` list or
    /// long array.
    pub fn long_array(&mut self, values: &[i64]) -> Result<()> {
        let format = self.format;
        let mut slot = self.array(TagID::LongArray, values.len())?;
        for &value in values {
            format.write_long(&mut slot.out, value)?;
        }
        Ok(())
    }
}
