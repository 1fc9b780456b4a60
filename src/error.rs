use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrefixTreeError {
    #[error("Cannot serialize value {value} for key `{key}`: {len} bytes exceeds the 255 byte limit")]
    ValueTooLarge {
        key: String,
        value: String,
        len: usize,
    },
    #[error("Codec error `{0}`")]
    Codec(String),
    #[error("Decode error at offset {offset}: {kind}")]
    Decode { offset: usize, kind: DecodeErrorKind },
}

/// Ways a serialized buffer can fail to describe a tree
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    #[error("unexpected end of input")]
    Truncated,
    #[error("expected a start-node marker, found {0:#04x}")]
    ExpectedStartNode(u8),
    #[error("unknown marker {0:#04x}")]
    UnknownMarker(u8),
    #[error("value record after a child record")]
    ValueAfterChild,
    #[error("node record holds neither values nor children")]
    EmptyNode,
    #[error("document seed byte is {0:#04x}, expected 0x00")]
    InvalidSeed(u8),
    #[error("document has no record under the seed edge")]
    MissingSeed,
    #[error("{0} trailing bytes after the document")]
    TrailingBytes(usize),
}

pub type Result<T> = std::result::Result<T, PrefixTreeError>;
