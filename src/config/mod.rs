/// Path compression modes the serializer provides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathCompression {
    /// Collapse chains of valueless single-child nodes into one record.
    Enabled,
    /// One record per node.
    ///
    /// Larger output, but every record boundary matches a node of the live
    /// tree. Useful when inspecting a dump by hand.
    Disabled,
}

impl Default for PathCompression {
    fn default() -> Self {
        PathCompression::Enabled
    }
}

/// Longest prefix a single record can carry, seed byte included
pub const MAX_PREFIX_LEN: u8 = u8::MAX;

/// Serializer settings
///
/// None of these change the grammar, so any document written under any
/// configuration is read back by the same deserializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireConfig {
    compression: PathCompression,
    max_prefix_len: u8,
}

impl Default for WireConfig {
    fn default() -> Self {
        Self {
            compression: PathCompression::default(),
            max_prefix_len: MAX_PREFIX_LEN,
        }
    }
}

impl WireConfig {
    pub fn uncompressed() -> Self {
        Self {
            compression: PathCompression::Disabled,
            ..Self::default()
        }
    }

    /// Caps the compressed run of a record; clamped to at least one byte
    pub fn with_max_prefix_len(mut self, len: u8) -> Self {
        self.max_prefix_len = len.max(1);
        self
    }

    #[inline(always)]
    pub fn compresses(&self) -> bool {
        self.compression == PathCompression::Enabled
    }

    #[inline(always)]
    pub fn max_prefix_len(&self) -> usize {
        self.max_prefix_len as usize
    }
}
