use crate::error::Result;
use std::borrow::Cow;

pub mod codec;
pub mod entry;

pub use codec::{RawCodec, Utf8Codec};
#[cfg(feature = "protobuf")]
pub use codec::ProstCodec;
#[cfg(feature = "uuid")]
pub use codec::UuidCodec;
pub use entry::Match;

/// Largest payload a single value record can carry
pub const MAX_VALUE_LEN: usize = u8::MAX as usize;

/// Turns stored values into byte payloads and back.
///
/// Only serialization and deserialization go through a codec; insertion and
/// search never touch it. Payloads longer than [`MAX_VALUE_LEN`] are refused
/// by the serializer, so implementations should not truncate to fit.
pub trait ValueCodec<T> {
    fn encode<'a>(&self, value: &'a T) -> Result<Cow<'a, [u8]>>;
    fn decode(&self, bytes: &[u8]) -> Result<T>;
}

impl<T, C> ValueCodec<T> for &C
where
    C: ValueCodec<T> + ?Sized,
{
    #[inline]
    fn encode<'a>(&self, value: &'a T) -> Result<Cow<'a, [u8]>> {
        (**self).encode(value)
    }
    #[inline]
    fn decode(&self, bytes: &[u8]) -> Result<T> {
        (**self).decode(bytes)
    }
}
