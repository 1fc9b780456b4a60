use fxhash::FxHashMap;
use std::fmt;

/// Nodes with more children than this get a hashed edge index
const INDEXED_THRESHOLD: usize = 16;

/// One cell of the live tree.
///
/// The live tree is never path compressed: every node sits exactly one key
/// byte below its parent.
pub(crate) struct Node<T> {
    /// Values of every key ending here, in insertion order
    pub(crate) values: Vec<T>,
    pub(crate) children: Children<T>,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            children: Children::default(),
        }
    }
}

impl<T> Node<T> {
    /// Follows `path` byte by byte
    #[inline]
    pub(crate) fn descend(&self, path: &[u8]) -> Option<&Node<T>> {
        let mut node = self;
        for byte in path {
            node = node.children.get(*byte)?;
        }
        Some(node)
    }

    /// Follows `path`, creating whatever nodes are missing on the way
    #[inline]
    pub(crate) fn descend_or_create(&mut self, path: &[u8]) -> &mut Node<T> {
        let mut node = self;
        for byte in path {
            node = node.children.get_or_create(*byte);
        }
        node
    }
}

// Trees are as deep as their longest key, so structural walks keep their
// pending nodes on the heap.

impl<T: PartialEq> PartialEq for Node<T> {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            if a.values != b.values || a.children.keys != b.children.keys {
                return false;
            }
            pending.extend(a.children.nodes.iter().zip(b.children.nodes.iter()));
        }
        true
    }
}

/// Shallow: lists the edge bytes below the node, not the subtrees
impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("values", &self.values)
            .field("children", &self.children)
            .finish()
    }
}

/// Edge table of a node, iterated in first insertion order
pub(crate) struct Children<T> {
    keys: Vec<u8>,
    nodes: Vec<Node<T>>,
    /// Edge byte to slot, only kept once linear scans get long
    index: Option<Box<FxHashMap<u8, usize>>>,
}

impl<T> Default for Children<T> {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            nodes: Vec::new(),
            index: None,
        }
    }
}

impl<T> Children<T> {
    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    fn position(&self, byte: u8) -> Option<usize> {
        match &self.index {
            Some(index) => index.get(&byte).copied(),
            None => self.keys.iter().position(|k| *k == byte),
        }
    }

    #[inline]
    pub(crate) fn contains(&self, byte: u8) -> bool {
        self.position(byte).is_some()
    }

    #[inline]
    pub(crate) fn get(&self, byte: u8) -> Option<&Node<T>> {
        self.position(byte).map(|pos| &self.nodes[pos])
    }

    #[inline]
    pub(crate) fn get_or_create(&mut self, byte: u8) -> &mut Node<T> {
        let pos = match self.position(byte) {
            Some(pos) => pos,
            None => self.push(byte, Node::default()),
        };
        &mut self.nodes[pos]
    }

    /// Appends a new edge; the caller guarantees `byte` is not present yet
    pub(crate) fn push(&mut self, byte: u8, node: Node<T>) -> usize {
        debug_assert!(!self.contains(byte));
        let pos = self.keys.len();
        self.keys.push(byte);
        self.nodes.push(node);

        match self.index.as_mut() {
            Some(index) => {
                index.insert(byte, pos);
            }
            None if self.keys.len() > INDEXED_THRESHOLD => {
                let index = self.keys.iter().enumerate().map(|(i, k)| (*k, i)).collect();
                self.index = Some(Box::new(index));
            }
            None => {}
        }
        pos
    }

    /// The `i`th edge in insertion order
    #[inline]
    pub(crate) fn get_index(&self, i: usize) -> Option<(u8, &Node<T>)> {
        Some((*self.keys.get(i)?, self.nodes.get(i)?))
    }

    /// The sole edge, if there is exactly one
    #[inline]
    pub(crate) fn only(&self) -> Option<(u8, &Node<T>)> {
        if self.len() == 1 {
            self.get_index(0)
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn iter(&self) -> impl Iterator<Item = (u8, &Node<T>)> {
        self.keys.iter().copied().zip(self.nodes.iter())
    }
}

impl<T> Drop for Children<T> {
    fn drop(&mut self) {
        // Detach every descendant before it is dropped, so no drop below
        // this one has children left to recurse into
        let mut pending = std::mem::take(&mut self.nodes);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children.nodes);
        }
    }
}

impl<T: PartialEq> PartialEq for Children<T> {
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys
            && self.nodes.iter().zip(other.nodes.iter()).all(|(a, b)| a == b)
    }
}

impl<T> fmt::Debug for Children<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|(byte, _)| char::from(byte)))
            .finish()
    }
}
