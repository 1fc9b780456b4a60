//! A small prefix tree that maps byte string keys to lists of values, with
//! ordered prefix search and a compact, path-compressed binary encoding.
//!
//! ```
//! use prefix_tree::{PrefixTree, Utf8Codec};
//!
//! let mut names = PrefixTree::new();
//! names.add("Lightning Bolt", String::from("lea-161"));
//! names.add("Lightning Helix", String::from("rav-213"));
//!
//! let bytes = names.serialize(&Utf8Codec).unwrap();
//! let decoded = PrefixTree::<String>::deserialize(&bytes, &Utf8Codec).unwrap();
//! assert_eq!(decoded, names);
//! assert_eq!(decoded.search("Lightning ").len(), 2);
//! ```

/// Serializer settings
pub mod config;
/// Value codecs and search results
pub mod data;

mod error;
mod tree;
mod wire;

#[cfg(test)]
mod proptests;

pub use crate::config::{PathCompression, WireConfig};
pub use crate::data::{Match, RawCodec, Utf8Codec, ValueCodec};
#[cfg(feature = "protobuf")]
pub use crate::data::ProstCodec;
#[cfg(feature = "uuid")]
pub use crate::data::UuidCodec;
pub use crate::error::{DecodeErrorKind, PrefixTreeError, Result};
pub use crate::tree::PrefixTree;
