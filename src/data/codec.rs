use super::ValueCodec;
use crate::error::*;
use bytes::Bytes;
use std::borrow::Cow;

/// Stores `String` values as their UTF-8 bytes
#[derive(Debug, Default, Clone, Copy)]
pub struct Utf8Codec;

impl ValueCodec<String> for Utf8Codec {
    #[inline]
    fn encode<'a>(&self, value: &'a String) -> Result<Cow<'a, [u8]>> {
        Ok(Cow::Borrowed(value.as_bytes()))
    }
    #[inline]
    fn decode(&self, bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec()).map_err(|e| PrefixTreeError::Codec(e.to_string()))
    }
}

/// Passes byte values through untouched
#[derive(Debug, Default, Clone, Copy)]
pub struct RawCodec;

impl ValueCodec<Vec<u8>> for RawCodec {
    #[inline]
    fn encode<'a>(&self, value: &'a Vec<u8>) -> Result<Cow<'a, [u8]>> {
        Ok(Cow::Borrowed(value))
    }
    #[inline]
    fn decode(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        Ok(bytes.to_vec())
    }
}

impl ValueCodec<Bytes> for RawCodec {
    #[inline]
    fn encode<'a>(&self, value: &'a Bytes) -> Result<Cow<'a, [u8]>> {
        Ok(Cow::Borrowed(value))
    }
    #[inline]
    fn decode(&self, bytes: &[u8]) -> Result<Bytes> {
        Ok(Bytes::copy_from_slice(bytes))
    }
}

#[cfg(feature = "protobuf")]
pub use self::protobuf::ProstCodec;

#[cfg(feature = "protobuf")]
mod protobuf {
    use super::*;
    use std::marker::PhantomData;

    /// Encodes any protobuf message with prost
    pub struct ProstCodec<M> {
        _marker: PhantomData<fn() -> M>,
    }

    impl<M> ProstCodec<M> {
        pub fn new() -> Self {
            Self {
                _marker: PhantomData,
            }
        }
    }

    impl<M> Default for ProstCodec<M> {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<M> ValueCodec<M> for ProstCodec<M>
    where
        M: prost::Message + Default,
    {
        #[inline]
        fn encode<'a>(&self, value: &'a M) -> Result<Cow<'a, [u8]>> {
            Ok(Cow::Owned(value.encode_to_vec()))
        }
        #[inline]
        fn decode(&self, bytes: &[u8]) -> Result<M> {
            M::decode(bytes).map_err(|e| PrefixTreeError::Codec(e.to_string()))
        }
    }
}

/// Stores UUIDs in their 16 byte binary form
#[cfg(feature = "uuid")]
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidCodec;

#[cfg(feature = "uuid")]
impl ValueCodec<uuid::Uuid> for UuidCodec {
    #[inline]
    fn encode<'a>(&self, value: &'a uuid::Uuid) -> Result<Cow<'a, [u8]>> {
        Ok(Cow::Borrowed(&value.as_bytes()[..]))
    }
    #[inline]
    fn decode(&self, bytes: &[u8]) -> Result<uuid::Uuid> {
        uuid::Uuid::from_slice(bytes).map_err(|e| PrefixTreeError::Codec(e.to_string()))
    }
}
