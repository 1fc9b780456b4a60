use super::{END_NODE, SEED, START_NODE, START_VALUE};
use crate::data::ValueCodec;
use crate::error::*;
use crate::tree::node::Node;
use crate::tree::PrefixTree;
use bytes::Buf;

/// Slot above the seed edge; the document record hangs off it
const WRAPPER: usize = 0;

/// A node under construction. Children are arena slots, and a child always
/// sits at a higher slot than its parent.
struct Slot<T> {
    values: Vec<T>,
    children: Vec<(u8, usize)>,
}

impl<T> Slot<T> {
    fn new() -> Self {
        Self {
            values: Vec::new(),
            children: Vec::new(),
        }
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.values.is_empty() && self.children.is_empty()
    }
}

/// A node record whose end marker has not been read yet
struct Frame {
    /// Slot the record's prefix leads to
    slot: usize,
    /// Cleared by the first child record
    values_open: bool,
}

/// The edge below `parent`, created if the document has not mentioned it yet
fn child_of<T>(arena: &mut Vec<Slot<T>>, parent: usize, byte: u8) -> usize {
    if let Some(&(_, slot)) = arena[parent].children.iter().find(|(b, _)| *b == byte) {
        return slot;
    }
    let slot = arena.len();
    arena.push(Slot::new());
    arena[parent].children.push((byte, slot));
    slot
}

/// Parses a document without recursion. Records walk their prefix down an
/// arena of slots, reusing edges an earlier sibling record already made, and
/// open records live on an explicit stack.
pub(crate) struct Decoder<'a, C: ?Sized> {
    input: &'a [u8],
    rest: &'a [u8],
    codec: &'a C,
}

impl<'a, C: ?Sized> Decoder<'a, C> {
    pub(crate) fn new(input: &'a [u8], codec: &'a C) -> Self {
        Self {
            input,
            rest: input,
            codec,
        }
    }

    #[inline]
    fn offset(&self) -> usize {
        self.input.len() - self.rest.remaining()
    }

    #[inline]
    fn error(offset: usize, kind: DecodeErrorKind) -> PrefixTreeError {
        PrefixTreeError::Decode { offset, kind }
    }

    #[inline]
    fn byte(&mut self) -> Result<u8> {
        if !self.rest.has_remaining() {
            return Err(Self::error(self.offset(), DecodeErrorKind::Truncated));
        }
        Ok(self.rest.get_u8())
    }

    #[inline]
    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.rest.remaining() < len {
            return Err(Self::error(self.offset(), DecodeErrorKind::Truncated));
        }
        let (head, tail) = self.rest.split_at(len);
        self.rest = tail;
        Ok(head)
    }

    /// Reads a record header, the start marker already consumed, and follows
    /// its prefix down from `parent`. An empty prefix stays on `parent`.
    fn open<T>(&mut self, arena: &mut Vec<Slot<T>>, parent: usize) -> Result<Frame> {
        let len_at = self.offset();
        let len = self.byte()? as usize;
        let prefix = self.take(len)?;
        log::trace!("record at {}: {} prefix bytes", len_at - 1, len);

        let mut slot = parent;
        for byte in prefix {
            slot = child_of(arena, slot, *byte);
        }
        Ok(Frame {
            slot,
            values_open: true,
        })
    }

    fn value<T>(&mut self) -> Result<T>
    where
        C: ValueCodec<T>,
    {
        let len = self.byte()? as usize;
        let payload = self.take(len)?;
        self.codec.decode(payload)
    }

    pub(crate) fn finish<T>(mut self) -> Result<PrefixTree<T>>
    where
        C: ValueCodec<T>,
    {
        let start = self.offset();
        match self.byte()? {
            START_NODE => {}
            other => return Err(Self::error(start, DecodeErrorKind::ExpectedStartNode(other))),
        }
        let mut arena: Vec<Slot<T>> = vec![Slot::new()];
        let top = self.open(&mut arena, WRAPPER)?;
        if let Some(&(edge, _)) = arena[WRAPPER].children.first() {
            if edge != SEED {
                return Err(Self::error(start + 2, DecodeErrorKind::InvalidSeed(edge)));
            }
        }

        let mut stack = vec![top];
        let mut len = 0;
        while let Some(frame) = stack.last_mut() {
            let at = self.offset();
            match self.byte()? {
                START_VALUE if frame.values_open => {
                    let value = self.value()?;
                    arena[frame.slot].values.push(value);
                    len += 1;
                }
                START_VALUE => return Err(Self::error(at, DecodeErrorKind::ValueAfterChild)),
                START_NODE => {
                    frame.values_open = false;
                    let parent = frame.slot;
                    let child = self.open(&mut arena, parent)?;
                    stack.push(child);
                }
                END_NODE => {
                    let slot = frame.slot;
                    stack.pop();
                    // A fresh node with nothing in it; the root may be empty
                    if slot != WRAPPER && arena[slot].is_empty() && !is_root(&arena, slot) {
                        return Err(Self::error(at, DecodeErrorKind::EmptyNode));
                    }
                }
                other => return Err(Self::error(at, DecodeErrorKind::UnknownMarker(other))),
            }
        }

        if self.rest.has_remaining() {
            return Err(Self::error(
                self.offset(),
                DecodeErrorKind::TrailingBytes(self.rest.remaining()),
            ));
        }
        let root = assemble(arena)
            .ok_or_else(|| Self::error(start, DecodeErrorKind::MissingSeed))?;
        Ok(PrefixTree { root, len })
    }
}

#[inline]
fn is_root<T>(arena: &[Slot<T>], slot: usize) -> bool {
    arena[WRAPPER].children == [(SEED, slot)]
}

/// Turns the arena into live nodes, deepest slots first, and returns the
/// node below the seed edge. `None` if the wrapper holds anything else.
fn assemble<T>(arena: Vec<Slot<T>>) -> Option<Node<T>> {
    let root = match arena[WRAPPER].children.as_slice() {
        [(SEED, root)] if arena[WRAPPER].values.is_empty() => *root,
        _ => return None,
    };

    let mut built: Vec<Option<Node<T>>> = (0..arena.len()).map(|_| None).collect();
    for (slot, Slot { values, children }) in arena.into_iter().enumerate().skip(1).rev() {
        let mut node = Node {
            values,
            ..Node::default()
        };
        for (byte, child) in children {
            if let Some(child) = built[child].take() {
                node.children.push(byte, child);
            }
        }
        built[slot] = Some(node);
    }
    built[root].take()
}
