/// A byte order usable by [`Standard`](crate::Standard) formats.
///
/// Blanket-implemented for every `zerocopy` byte order; name [`BigEndian`](crate::BigEndian)
/// or [`LittleEndian`](crate::LittleEndian) to pick one.
pub trait ByteOrder: zerocopy::ByteOrder + Send + Sync + 'static {}

impl<T: zerocopy::ByteOrder + Send + Sync + 'static> ByteOrder for T {}
