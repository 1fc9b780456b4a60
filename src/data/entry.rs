use std::fmt;

/// A single search hit: the full key and one value stored under it
#[derive(Clone, PartialEq, Eq)]
pub struct Match<'a, T> {
    pub key: Vec<u8>,
    pub value: &'a T,
}

impl<'a, T> Match<'a, T> {
    #[inline]
    pub fn new(key: Vec<u8>, value: &'a T) -> Self {
        Self { key, value }
    }

    /// The key as text, if it is valid UTF-8
    ///
    /// Keys added as `&str` always are.
    #[inline]
    pub fn key_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.key).ok()
    }

    #[inline]
    pub fn into_pair(self) -> (Vec<u8>, &'a T) {
        (self.key, self.value)
    }
}

impl<'a, T: fmt::Debug> fmt::Debug for Match<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("key", &String::from_utf8_lossy(&self.key))
            .field("value", self.value)
            .finish()
    }
}
