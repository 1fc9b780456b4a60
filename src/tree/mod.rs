pub(crate) mod node;

use crate::data::Match;
use self::node::Node;
use std::fmt;

/// Multi-valued prefix tree over byte string keys.
///
/// Every key byte is one level of the tree, and each node keeps the values
/// of all keys that end on it in insertion order. Adding the same key twice
/// stores both values.
///
/// `&str` keys are indexed by their UTF-8 bytes, so every edge of the tree
/// fits the single edge byte of the wire format.
///
/// ```
/// use prefix_tree::PrefixTree;
///
/// let mut tree = PrefixTree::new();
/// tree.add("hello", 'a');
/// tree.add("helvo", 'b');
///
/// let hits: Vec<_> = tree.search("hel").into_iter().map(|m| *m.value).collect();
/// assert_eq!(hits, vec!['a', 'b']);
/// ```
pub struct PrefixTree<T> {
    pub(crate) root: Node<T>,
    /// Number of stored values
    pub(crate) len: usize,
}

impl<T> Default for PrefixTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PrefixTree<T> {
    #[inline]
    pub fn new() -> Self {
        Self {
            root: Node::default(),
            len: 0,
        }
    }

    /// Stores `value` under `key`, next to any values already there
    #[inline]
    pub fn add<K: AsRef<[u8]>>(&mut self, key: K, value: T) {
        self.root.descend_or_create(key.as_ref()).values.push(value);
        self.len += 1;
    }

    /// Every `(key, value)` pair whose key starts with `prefix`.
    ///
    /// Within the matched subtree a node first yields everything below each
    /// of its children, children taken in the order they were first created,
    /// and only then its own values. So a longer key comes before a shorter
    /// key on the same branch, and the older branch comes before its younger
    /// siblings. An unknown prefix yields no matches.
    pub fn search<P: AsRef<[u8]>>(&self, prefix: P) -> Vec<Match<'_, T>> {
        let prefix = prefix.as_ref();
        let mut matches = Vec::new();
        let start = match self.root.descend(prefix) {
            Some(node) => node,
            None => return matches,
        };

        let mut key = prefix.to_vec();
        // (node, next child to visit)
        let mut stack: Vec<(&Node<T>, usize)> = vec![(start, 0)];
        while let Some(top) = stack.last_mut() {
            let node = top.0;
            match node.children.get_index(top.1) {
                Some((byte, child)) => {
                    top.1 += 1;
                    key.push(byte);
                    stack.push((child, 0));
                }
                None => {
                    matches.extend(node.values.iter().map(|v| Match::new(key.clone(), v)));
                    stack.pop();
                    if !stack.is_empty() {
                        key.pop();
                    }
                }
            }
        }
        matches
    }

    /// Number of stored values, duplicates included
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<K: AsRef<[u8]>, T> Extend<(K, T)> for PrefixTree<T> {
    fn extend<I: IntoIterator<Item = (K, T)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}

impl<K: AsRef<[u8]>, T> FromIterator<(K, T)> for PrefixTree<T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut tree = PrefixTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T: PartialEq> PartialEq for PrefixTree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.root == other.root
    }
}

/// Prints the entries in search order
impl<T: fmt::Debug> fmt::Debug for PrefixTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.search(b"")
                    .into_iter()
                    .map(|m| (String::from_utf8_lossy(&m.key).into_owned(), m.value)),
            )
            .finish()
    }
}
