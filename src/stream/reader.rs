use std::io::Read;

use crate::{Error, Format, Result, Source, TagID, codec::mutf8};

/// Maximum container nesting the reader accepts.
pub const MAX_DEPTH: usize = 512;

/// Upper bound on elements reserved up front from a declared count.
const MAX_PREALLOC: usize = 1 << 16;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Mode {
    Compound,
    List,
}

#[derive(Clone, Copy, Debug)]
struct Frame {
    mode: Mode,
    kind: TagID,
    item: TagID,
    remaining: u32,
}

impl Frame {
    const fn compound() -> Self {
        Self {
            mode: Mode::Compound,
            kind: TagID::Compound,
            item: TagID::End,
            remaining: 0,
        }
    }

    const fn sequence(kind: TagID, item: TagID, remaining: u32) -> Self {
        Self {
            mode: Mode::List,
            kind,
            item,
            remaining,
        }
    }
}

/// A pull cursor over an NBT byte stream.
///
/// The reader keeps one frame per open compound, list or array and checks
/// every call against it: values read from a list must have the list's item
/// type and may not outnumber its declared count, compounds must close on
/// `End`, and lists must be drained before they close. Type-tag bytes are
/// looked ahead at most one at a time through [`next_type`](Self::next_type).
///
/// At the root, call [`next_type`](Self::next_type) (which reports
/// [`TagID::Compound`] or [`TagID::RootList`]), then
/// [`next_name`](Self::next_name) for the root name, then
/// [`begin_compound`](Self::begin_compound) or
/// [`begin_root_list`](Self::begin_root_list).
///
/// # Example
///
/// ```
/// use nbt_stream::{JAVA, NbtReader, TagID};
///
/// let data = [0x0A, 0, 0, 0x03, 0, 1, b'x', 0, 0, 0, 7, 0x00];
/// let mut reader = NbtReader::new(JAVA, &data[..]);
/// assert_eq!(reader.next_type()?, TagID::Compound);
/// assert_eq!(reader.next_name()?, "");
/// reader.begin_compound()?;
/// assert_eq!(reader.next_type()?, TagID::Int);
/// assert_eq!(reader.next_name()?, "x");
/// assert_eq!(reader.next_int()?, 7);
/// reader.end_compound()?;
/// # Ok::<(), nbt_stream::Error>(())
/// ```
pub struct NbtReader<F, R> {
    format: F,
    source: R,
    stack: Vec<Frame>,
    pending: Option<TagID>,
    first: bool,
    root_named: bool,
    scratch: Vec<u8>,
}

impl<F: Format, R: Source> NbtReader<F, R> {
    pub fn new(format: F, source: R) -> Self {
        Self {
            format,
            source,
            stack: Vec::new(),
            pending: None,
            first: true,
            root_named: false,
            scratch: Vec::new(),
        }
    }

    #[inline]
    pub fn format(&self) -> F {
        self.format
    }

    #[inline]
    pub fn get_ref(&self) -> &R {
        &self.source
    }

    /// Number of open containers.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Releases the source. Always succeeds, whatever state the cursor is in.
    pub fn into_inner(self) -> R {
        self.source
    }

    #[inline]
    fn read_u8(&mut self) -> Result<u8> {
        let mut byte = [0u8; 1];
        self.source.read_exact(&mut byte)?;
        Ok(byte[0])
    }

    fn read_type(&mut self) -> Result<TagID> {
        let tag = TagID::try_from(self.read_u8()?)?;
        if self.first {
            self.first = false;
            if tag == TagID::List {
                return Ok(TagID::RootList);
            }
        }
        Ok(tag)
    }

    fn read_count(&mut self) -> Result<u32> {
        let count = self.format.read_int(&mut self.source)?;
        u32::try_from(count).map_err(|_| Error::NegativeLength(count as i64))
    }

    fn read_list_header(&mut self) -> Result<(TagID, u32)> {
        let item = TagID::try_from(self.read_u8()?)?;
        let count = self.read_count()?;
        if item == TagID::End && count > 0 {
            return Err(Error::InvalidTagType(TagID::End.id()));
        }
        Ok((item, count))
    }

    fn push(&mut self, frame: Frame) -> Result<()> {
        if self.stack.len() >= MAX_DEPTH {
            return Err(Error::TooDeep(MAX_DEPTH));
        }
        tracing::trace!(
            kind = %frame.kind,
            item = %frame.item,
            size = frame.remaining,
            depth = self.stack.len(),
            "begin"
        );
        self.stack.push(frame);
        Ok(())
    }

    fn pop_sequence(&mut self, kind: TagID) -> Result<()> {
        match self.stack.last() {
            Some(frame) if frame.kind == kind => {
                if frame.remaining > 0 {
                    return Err(Error::ListUnderrun {
                        kind,
                        remaining: frame.remaining,
                    });
                }
                self.stack.pop();
                tracing::trace!(kind = %kind, depth = self.stack.len(), "end");
                Ok(())
            }
            _ => Err(Error::NotInContainer(kind)),
        }
    }

    fn list_frame(&self) -> Result<&Frame> {
        match self.stack.last() {
            Some(frame) if frame.mode == Mode::List => Ok(frame),
            _ => Err(Error::NotInContainer(TagID::List)),
        }
    }

    /// Reads one type-tag byte and holds it as the pending type.
    ///
    /// The first type byte of a stream that denotes a list is reported as
    /// [`TagID::RootList`].
    pub fn next_type(&mut self) -> Result<TagID> {
        let tag = self.read_type()?;
        self.pending = Some(tag);
        Ok(tag)
    }

    /// Consumes one value slot of kind `tag`.
    ///
    /// Inside a list or array this counts off one declared element; elsewhere it
    /// consumes the pending type (reading one if none is pending).
    fn expect(&mut self, tag: TagID) -> Result<()> {
        if let Some(frame) = self.stack.last_mut()
            && frame.mode == Mode::List
        {
            if frame.item != tag {
                return Err(Error::TagMismatch {
                    expected: tag,
                    actual: frame.item,
                });
            }
            if frame.remaining == 0 {
                return Err(Error::ListOverrun(frame.kind));
            }
            frame.remaining -= 1;
            return Ok(());
        }
        let actual = match self.pending.take() {
            Some(actual) => actual,
            None => self.read_type()?,
        };
        if actual != tag {
            return Err(Error::TagMismatch {
                expected: tag,
                actual,
            });
        }
        Ok(())
    }

    pub fn begin_compound(&mut self) -> Result<()> {
        self.expect(TagID::Compound)?;
        self.push(Frame::compound())
    }

    /// Closes the innermost compound; the next type must be `End`.
    pub fn end_compound(&mut self) -> Result<()> {
        match self.stack.last() {
            Some(frame) if frame.mode == Mode::Compound => {}
            _ => return Err(Error::NotInContainer(TagID::Compound)),
        }
        self.expect(TagID::End)?;
        self.stack.pop();
        tracing::trace!(kind = %TagID::Compound, depth = self.stack.len(), "end");
        Ok(())
    }

    pub fn begin_list(&mut self) -> Result<()> {
        self.expect(TagID::List)?;
        let (item, count) = self.read_list_header()?;
        self.push(Frame::sequence(TagID::List, item, count))
    }

    pub fn end_list(&mut self) -> Result<()> {
        self.pop_sequence(TagID::List)
    }

    /// Enters a root list. The root name must already have been read.
    pub fn begin_root_list(&mut self) -> Result<()> {
        self.expect(TagID::RootList)?;
        let item = TagID::try_from(self.read_u8()?)?;
        if item == TagID::End {
            return Err(Error::InvalidTagType(TagID::End.id()));
        }
        self.push(Frame::sequence(TagID::RootList, item, 1))
    }

    pub fn end_root_list(&mut self) -> Result<()> {
        self.pop_sequence(TagID::RootList)
    }

    fn begin_array(&mut self, kind: TagID, item: TagID) -> Result<u32> {
        self.expect(kind)?;
        let count = self.read_count()?;
        self.push(Frame::sequence(kind, item, count))?;
        Ok(count)
    }

    pub fn begin_byte_array(&mut self) -> Result<()> {
        self.begin_array(TagID::ByteArray, TagID::Byte).map(drop)
    }

    pub fn end_byte_array(&mut self) -> Result<()> {
        self.pop_sequence(TagID::ByteArray)
    }

    pub fn begin_int_array(&mut self) -> Result<()> {
        self.begin_array(TagID::IntArray, TagID::Int).map(drop)
    }

    pub fn end_int_array(&mut self) -> Result<()> {
        self.pop_sequence(TagID::IntArray)
    }

    pub fn begin_long_array(&mut self) -> Result<()> {
        self.begin_array(TagID::LongArray, TagID::Long).map(drop)
    }

    pub fn end_long_array(&mut self) -> Result<()> {
        self.pop_sequence(TagID::LongArray)
    }

    /// Item type of the innermost list or array.
    pub fn list_item_type(&self) -> Result<TagID> {
        self.list_frame().map(|frame| frame.item)
    }

    /// Elements of the innermost list or array not yet consumed.
    pub fn list_size(&self) -> Result<usize> {
        self.list_frame().map(|frame| frame.remaining as usize)
    }

    pub fn list_has_next(&self) -> Result<bool> {
        self.list_frame().map(|frame| frame.remaining > 0)
    }

    /// Reads a length-prefixed string: a compound entry name, the root name, or
    /// the payload of a `String` value.
    pub fn next_name(&mut self) -> Result<String> {
        self.first = false;
        if self.stack.is_empty() {
            self.root_named = true;
        }
        let len = self.format.read_utf_length(&mut self.source)?;
        if len == 0 {
            return Ok(String::new());
        }
        self.scratch.clear();
        (&mut self.source)
            .take(len as u64)
            .read_to_end(&mut self.scratch)?;
        if self.scratch.len() < len {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "failed to read entire string",
            )
            .into());
        }
        Ok(mutf8::decode(&self.scratch)?.into_owned())
    }

    pub fn next_byte(&mut self) -> Result<i8> {
        self.expect(TagID::Byte)?;
        Ok(self.read_u8()? as i8)
    }

    pub fn next_bool(&mut self) -> Result<bool> {
        Ok(self.next_byte()? != 0)
    }

    pub fn next_short(&mut self) -> Result<i16> {
        self.expect(TagID::Short)?;
        self.format.read_short(&mut self.source)
    }

    pub fn next_int(&mut self) -> Result<i32> {
        self.expect(TagID::Int)?;
        self.format.read_int(&mut self.source)
    }

    pub fn next_long(&mut self) -> Result<i64> {
        self.expect(TagID::Long)?;
        self.format.read_long(&mut self.source)
    }

    pub fn next_float(&mut self) -> Result<f32> {
        self.expect(TagID::Float)?;
        self.format.read_float(&mut self.source)
    }

    pub fn next_double(&mut self) -> Result<f64> {
        self.expect(TagID::Double)?;
        self.format.read_double(&mut self.source)
    }

    pub fn next_string(&mut self) -> Result<String> {
        self.expect(TagID::String)?;
        self.next_name()
    }

    fn drain(&mut self) {
        if let Some(frame) = self.stack.last_mut() {
            frame.remaining = 0;
        }
    }

    /// Reads a whole `ByteArray` value in one call.
    pub fn next_byte_array(&mut self) -> Result<Vec<u8>> {
        let count = self.begin_array(TagID::ByteArray, TagID::Byte)? as usize;
        let mut bytes = Vec::with_capacity(count.min(MAX_PREALLOC));
        (&mut self.source)
            .take(count as u64)
            .read_to_end(&mut bytes)?;
        if bytes.len() < count {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "failed to read entire byte array",
            )
            .into());
        }
        self.drain();
        self.end_byte_array()?;
        Ok(bytes)
    }

    /// Reads a whole `IntArray` value in one call.
    pub fn next_int_array(&mut self) -> Result<Vec<i32>> {
        let count = self.begin_array(TagID::IntArray, TagID::Int)? as usize;
        let mut values = Vec::with_capacity(count.min(MAX_PREALLOC));
        for _ in 0..count {
            values.push(self.format.read_int(&mut self.source)?);
        }
        self.drain();
        self.end_int_array()?;
        Ok(values)
    }

    /// Reads a whole `LongArray` value in one call.
    pub fn next_long_array(&mut self) -> Result<Vec<i64>> {
        let count = self.begin_array(TagID::LongArray, TagID::Long)? as usize;
        let mut values = Vec::with_capacity(count.min(MAX_PREALLOC));
        for _ in 0..count {
            values.push(self.format.read_long(&mut self.source)?);
        }
        self.drain();
        self.end_long_array()?;
        Ok(values)
    }

    /// Skips one complete value without building it.
    ///
    /// Inside a list or array this skips the next element. Elsewhere it skips
    /// the value of the pending type (reading the type byte if none is
    /// pending). At the root it also skips the root name, unless
    /// [`next_name`](Self::next_name) has already consumed it.
    pub fn skip_value(&mut self) -> Result<()> {
        let tag = match self.stack.last_mut() {
            Some(frame) if frame.mode == Mode::List => {
                if frame.remaining == 0 {
                    return Err(Error::ListOverrun(frame.kind));
                }
                frame.remaining -= 1;
                frame.item
            }
            _ => match self.pending.take() {
                Some(tag) => tag,
                None => self.read_type()?,
            },
        };
        if self.stack.is_empty()
            && !self.root_named
            && matches!(tag, TagID::Compound | TagID::RootList)
        {
            self.skip_string()?;
        }
        self.skip_payload(tag)
    }

    fn skip_string(&mut self) -> Result<()> {
        let len = self.format.read_utf_length(&mut self.source)?;
        self.source.skip_bytes(len as u64)
    }

    fn skip_payload(&mut self, tag: TagID) -> Result<()> {
        match tag {
            TagID::End => Ok(()),
            TagID::Byte
            | TagID::Short
            | TagID::Int
            | TagID::Long
            | TagID::Float
            | TagID::Double => self.format.skip_number(&mut self.source, tag),
            TagID::String => self.skip_string(),
            TagID::ByteArray | TagID::IntArray | TagID::LongArray => {
                let item = match tag.array_element() {
                    Some(item) => item,
                    None => return Err(Error::InvalidTagType(tag.id())),
                };
                let count = self.read_count()?;
                self.push(Frame::sequence(tag, item, count))?;
                self.skip_elements(item, count)?;
                self.pop_sequence(tag)
            }
            TagID::List => {
                let (item, count) = self.read_list_header()?;
                self.push(Frame::sequence(TagID::List, item, count))?;
                self.skip_elements(item, count)?;
                self.pop_sequence(TagID::List)
            }
            TagID::RootList => {
                let item = TagID::try_from(self.read_u8()?)?;
                if item == TagID::End {
                    return Err(Error::InvalidTagType(TagID::End.id()));
                }
                self.push(Frame::sequence(TagID::RootList, item, 1))?;
                self.skip_elements(item, 1)?;
                self.pop_sequence(TagID::RootList)
            }
            TagID::Compound => {
                self.push(Frame::compound())?;
                loop {
                    let entry = self.read_type()?;
                    if entry == TagID::End {
                        break;
                    }
                    self.skip_string()?;
                    self.skip_payload(entry)?;
                }
                self.stack.pop();
                Ok(())
            }
        }
    }

    fn skip_elements(&mut self, item: TagID, count: u32) -> Result<()> {
        match self.format.payload_width(item) {
            Some(width) => {
                let bytes = width * count as u64;
                tracing::trace!(item = %item, count, bytes, "bulk skip");
                self.source.skip_bytes(bytes)?;
            }
            None => {
                for _ in 0..count {
                    self.skip_payload(item)?;
                }
            }
        }
        self.drain();
        Ok(())
    }
}
