//! Compact binary form of a [`PrefixTree`].
//!
//! ```text
//! node   := START_NODE prefixLen prefixByte{prefixLen} value* node* END_NODE
//! value  := START_VALUE payloadLen payloadByte{payloadLen}
//! ```
//!
//! A record's prefix starts with the edge byte leading into it and goes on
//! through any chain of valueless single-child nodes below, so those chains
//! cost one record instead of one per byte. The document is a single record
//! whose first prefix byte is a synthetic `0x00` seed standing in for the
//! edge into the root.
//!
//! Decoding walks every prefix byte down from the enclosing node, reusing an
//! edge if an earlier record already made it. Sibling records may therefore
//! share a first byte, and a record with an empty prefix adds to the node it
//! sits in.

mod decode;
mod encode;

use crate::config::WireConfig;
use crate::data::ValueCodec;
use crate::error::Result;
use crate::tree::PrefixTree;
use bytes::Bytes;
use std::fmt::Debug;

pub(crate) const START_NODE: u8 = 0x00;
pub(crate) const START_VALUE: u8 = 0x01;
pub(crate) const END_NODE: u8 = 0x02;

/// Edge byte the document record is seeded with
pub(crate) const SEED: u8 = 0x00;

impl<T> PrefixTree<T> {
    /// Encodes the tree with the default [`WireConfig`]
    #[inline]
    pub fn serialize<C>(&self, codec: &C) -> Result<Bytes>
    where
        C: ValueCodec<T> + ?Sized,
        T: Debug,
    {
        self.serialize_with(codec, &WireConfig::default())
    }

    /// Encodes the tree.
    ///
    /// Fails with [`PrefixTreeError::ValueTooLarge`] if the codec produces a
    /// payload over 255 bytes.
    ///
    /// [`PrefixTreeError::ValueTooLarge`]: crate::PrefixTreeError::ValueTooLarge
    pub fn serialize_with<C>(&self, codec: &C, config: &WireConfig) -> Result<Bytes>
    where
        C: ValueCodec<T> + ?Sized,
        T: Debug,
    {
        let bytes = encode::Encoder::new(codec, config).finish(&self.root)?;
        log::debug!("serialized {} values into {} bytes", self.len, bytes.len());
        Ok(bytes)
    }

    /// Rebuilds a tree from [`serialize`](Self::serialize) output.
    ///
    /// The result has one node per key byte, exactly as if every key had been
    /// added again in order, so it compares equal to the encoded tree.
    pub fn deserialize<C>(input: &[u8], codec: &C) -> Result<Self>
    where
        C: ValueCodec<T> + ?Sized,
    {
        let tree = decode::Decoder::new(input, codec).finish()?;
        log::debug!("deserialized {} values from {} bytes", tree.len, input.len());
        Ok(tree)
    }
}
