use super::{END_NODE, SEED, START_NODE, START_VALUE};
use crate::config::WireConfig;
use crate::data::{ValueCodec, MAX_VALUE_LEN};
use crate::error::*;
use crate::tree::node::Node;
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt::Debug;

pub(crate) struct Encoder<'c, C: ?Sized> {
    codec: &'c C,
    config: &'c WireConfig,
    out: BytesMut,
    /// Key bytes of the record being written, seed first
    key: Vec<u8>,
}

impl<'c, C: ?Sized> Encoder<'c, C> {
    pub(crate) fn new(codec: &'c C, config: &'c WireConfig) -> Self {
        Self {
            codec,
            config,
            out: BytesMut::with_capacity(64),
            key: Vec::new(),
        }
    }

    /// Writes the document. Open records wait on an explicit stack, so deep
    /// uncompressed chains cost heap, not call depth.
    pub(crate) fn finish<T>(mut self, root: &Node<T>) -> Result<Bytes>
    where
        C: ValueCodec<T>,
        T: Debug,
    {
        // (node whose children are written next, next child, key mark)
        let mut stack: Vec<(&Node<T>, usize, usize)> = Vec::new();
        let mark = self.key.len();
        stack.push((self.open(root, SEED)?, 0, mark));

        while let Some(top) = stack.last_mut() {
            let node = top.0;
            match node.children.get_index(top.1) {
                Some((byte, child)) => {
                    top.1 += 1;
                    let mark = self.key.len();
                    let target = self.open(child, byte)?;
                    stack.push((target, 0, mark));
                }
                None => {
                    let mark = top.2;
                    stack.pop();
                    self.out.put_u8(END_NODE);
                    self.key.truncate(mark);
                }
            }
        }
        Ok(self.out.freeze())
    }

    /// Writes a record header and its values, returning the node the prefix
    /// ends on
    fn open<'n, T>(&mut self, node: &'n Node<T>, edge: u8) -> Result<&'n Node<T>>
    where
        C: ValueCodec<T>,
        T: Debug,
    {
        self.out.put_u8(START_NODE);
        // Patched once the run length is known
        let len_at = self.out.len();
        self.out.put_u8(0);
        self.out.put_u8(edge);
        self.key.push(edge);

        let mut target = node;
        let mut run = 1;
        if self.config.compresses() {
            while run < self.config.max_prefix_len() && target.values.is_empty() {
                let (byte, child) = match target.children.only() {
                    Some(edge) => edge,
                    None => break,
                };
                self.out.put_u8(byte);
                self.key.push(byte);
                target = child;
                run += 1;
            }
        }
        self.out[len_at] = run as u8;
        log::trace!("record at depth {}: {} prefix bytes", self.key.len() - run, run);

        for value in &target.values {
            let payload = self.codec.encode(value)?;
            if payload.len() > MAX_VALUE_LEN {
                return Err(PrefixTreeError::ValueTooLarge {
                    key: String::from_utf8_lossy(&self.key[1..]).into_owned(),
                    value: format!("{:?}", value),
                    len: payload.len(),
                });
            }
            self.out.put_u8(START_VALUE);
            self.out.put_u8(payload.len() as u8);
            self.out.put_slice(&payload);
        }
        Ok(target)
    }
}
