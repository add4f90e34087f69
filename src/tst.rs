// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! The ternary search tree engine.
//!
//! Grounded directly on `tst.c`/`tst.h` from the original `sysprog21/dict`
//! source: byte-wise three-way branching, refcounted sentinels, unique-suffix
//! collapse plus subtree rotation on delete. The pointer-chasing of the
//! original is replaced by [`NodeId`] indirection into a [`NodePool`], and the
//! "pointer to slot" delete-stack variant (the one the original spec
//! recommends over the parent-pointer variant) is modeled explicitly as
//! [`Slot`] entries rather than raw `&mut Option<NodeId>` borrows, which
//! would not satisfy the borrow checker while also holding `&mut self`.

use crate::node_pool::{Node, NodeId, NodePool};
use crate::storage_mode::Payload;
use crate::{Error, Result};

/// Maximum payload length of a key, in bytes (excludes the implicit terminator).
pub const MAX_KEY_LEN: usize = 127;

/// Bound on the delete-walk stack; twice [`MAX_KEY_LEN`], matching the
/// original's `STKMAX = WRDMAX * 2`. `MAX_KEY_LEN` already guarantees no walk
/// can exceed this, so the check in [`Tst::delete`] is a defensive mirror of
/// the original rather than a condition that can occur in practice.
pub const STKMAX: usize = 256;

/// Outcome of a successful delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The key's last occurrence was removed from the tree.
    Removed,
    /// The key still has `refcnt` remaining occurrences; nothing was removed.
    StillReferenced(u32),
}

#[derive(Clone, Copy)]
enum Branch {
    Lo,
    Eq,
    Hi,
}

/// Identifies the link field that resolves to a particular node: either the
/// tree's root, or a specific branch of a specific node.
#[derive(Clone, Copy)]
enum Slot {
    Root,
    Child(NodeId, Branch),
}

/// A ternary search tree over byte strings, parameterized by the sentinel
/// payload representation (`Box<[u8]>` for COPY, `&'data [u8]` for
/// REFERENCE — see [`crate::storage_mode`]).
pub(crate) struct Tst<P: Payload> {
    pool: NodePool<P>,
    root: Option<NodeId>,
    len: usize,
}

impl<P: Payload> Tst<P> {
    pub fn new() -> Self {
        Self {
            pool: NodePool::new(),
            root: None,
            len: 0,
        }
    }

    /// Number of distinct keys currently stored (duplicates count once).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn refcnt(&self, id: NodeId) -> u32 {
        match self.pool.get(id) {
            Node::Terminal { refcnt, .. } => *refcnt,
            Node::Internal { .. } => 0,
        }
    }

    pub fn bytes(&self, id: NodeId) -> &[u8] {
        match self.pool.get(id) {
            Node::Terminal { payload, .. } => payload,
            Node::Internal { .. } => &[],
        }
    }

    fn slot_get(&self, slot: Slot) -> Option<NodeId> {
        match slot {
            Slot::Root => self.root,
            Slot::Child(id, Branch::Lo) => self.pool.get(id).lo(),
            Slot::Child(id, Branch::Hi) => self.pool.get(id).hi(),
            Slot::Child(id, Branch::Eq) => match self.pool.get(id) {
                Node::Internal { eq, .. } => *eq,
                Node::Terminal { .. } => None,
            },
        }
    }

    fn slot_set(&mut self, slot: Slot, value: Option<NodeId>) {
        match slot {
            Slot::Root => self.root = value,
            Slot::Child(id, Branch::Lo) => self.pool.get_mut(id).set_lo(value),
            Slot::Child(id, Branch::Hi) => self.pool.get_mut(id).set_hi(value),
            Slot::Child(id, Branch::Eq) => {
                if let Node::Internal { eq, .. } = self.pool.get_mut(id) {
                    *eq = value;
                }
            }
        }
    }

    /// Byte at position `i` of `key`, or the implicit NUL terminator past the
    /// end — the same "one past the string is always 0" trick `next_node`
    /// relies on in the original.
    fn byte_at(key: &[u8], i: usize) -> u8 {
        key.get(i).copied().unwrap_or(0)
    }

    /// Inserts `key`. `make_payload` is only invoked if `key` is not already
    /// present, so REFERENCE-mode callers never pay for a copy and COPY-mode
    /// callers never allocate on a duplicate.
    ///
    /// Returns the sentinel's [`NodeId`] and whether this was a fresh insert
    /// (`false` means the key already existed and `refcnt` was bumped).
    pub fn insert(&mut self, key: &[u8], make_payload: impl FnOnce() -> P) -> Result<(NodeId, bool)> {
        if key.len() > MAX_KEY_LEN {
            return Err(Error::KeyTooLong);
        }

        let mut slot = Slot::Root;
        let mut i = 0usize;

        while let Some(current) = self.slot_get(slot) {
            let byte = Self::byte_at(key, i);

            match self.pool.get(current) {
                Node::Internal { key: nkey, .. } => {
                    let nkey = *nkey;
                    slot = if byte == nkey {
                        i += 1;
                        Slot::Child(current, Branch::Eq)
                    } else if byte < nkey {
                        Slot::Child(current, Branch::Lo)
                    } else {
                        Slot::Child(current, Branch::Hi)
                    };
                }
                Node::Terminal { .. } => {
                    if byte == 0 {
                        let refcnt = match self.pool.get_mut(current) {
                            Node::Terminal { refcnt, .. } => {
                                *refcnt += 1;
                                *refcnt
                            }
                            Node::Internal { .. } => unreachable!(),
                        };
                        let _ = refcnt;
                        return Ok((current, false));
                    }
                    // 0 is the minimal byte value, so any non-zero byte sorts
                    // to the hi side of a sentinel; sentinels never have a lo.
                    slot = Slot::Child(current, Branch::Hi);
                }
            }
        }

        // `slot` is an empty link; attach the remaining bytes as a fresh chain.
        for &b in &key[i..] {
            let id = self.pool.alloc(Node::Internal {
                key: b,
                lo: None,
                eq: None,
                hi: None,
            })?;
            self.slot_set(slot, Some(id));
            slot = Slot::Child(id, Branch::Eq);
        }

        let payload = make_payload();
        let sentinel = self.pool.alloc(Node::Terminal {
            refcnt: 1,
            payload,
            lo: None,
            hi: None,
        })?;
        self.slot_set(slot, Some(sentinel));
        self.len += 1;

        Ok((sentinel, true))
    }

    /// Exact-match search. Never allocates or mutates.
    pub fn search(&self, key: &[u8]) -> Option<NodeId> {
        let mut current = self.root;
        let mut i = 0usize;

        while let Some(id) = current {
            let byte = Self::byte_at(key, i);

            match self.pool.get(id) {
                Node::Internal { key: nkey, lo, eq, hi } => {
                    current = if byte == *nkey {
                        i += 1;
                        *eq
                    } else if byte < *nkey {
                        *lo
                    } else {
                        *hi
                    };
                }
                Node::Terminal { hi, .. } => {
                    if byte == 0 {
                        return Some(id);
                    }
                    current = *hi;
                }
            }
        }

        None
    }

    /// Locates the node matching the prefix's last byte and collects up to
    /// `max` stored keys reachable beneath it that genuinely begin with
    /// `prefix`. Returns `None` for an empty prefix or a prefix with no
    /// matches (mirroring `tst_search_prefix`'s `NULL` return).
    pub fn search_prefix(&self, prefix: &[u8], max: usize) -> Option<Vec<NodeId>> {
        if prefix.is_empty() || max == 0 {
            return None;
        }

        let nchr = prefix.len();
        let mut current = self.root;
        let mut pos = 0usize;

        while let Some(id) = current {
            let node_key = match self.pool.get(id) {
                Node::Internal { key, .. } => *key,
                Node::Terminal { .. } => 0,
            };
            let byte = prefix[pos];

            if byte == node_key {
                if pos == nchr - 1 {
                    let mut out = Vec::new();
                    self.suggest(id, byte, nchr, max, &mut out);
                    return Some(out);
                }
                pos += 1;
                current = match self.pool.get(id) {
                    Node::Internal { eq, .. } => *eq,
                    Node::Terminal { .. } => None,
                };
            } else if byte < node_key {
                current = self.pool.get(id).lo();
            } else {
                current = self.pool.get(id).hi();
            }
        }

        None
    }

    /// In-order traversal (`lo`, then `eq` if internal, then `hi`) collecting
    /// terminals whose payload's byte at `nchr - 1` equals `guard` — the
    /// guard that keeps sibling subtrees sharing only the prefix's earlier
    /// bytes from leaking into the result (see spec §4.3 step 2).
    ///
    /// Implemented with an explicit work stack instead of recursion, per the
    /// design note calling out the original's recursive traversal/teardown.
    fn suggest(&self, start: NodeId, guard: u8, nchr: usize, max: usize, out: &mut Vec<NodeId>) {
        enum Frame {
            Descend(Option<NodeId>),
            Visit(NodeId),
        }

        let mut stack = vec![Frame::Descend(Some(start))];

        while let Some(frame) = stack.pop() {
            if out.len() >= max {
                break;
            }

            match frame {
                Frame::Descend(None) => {}
                Frame::Descend(Some(id)) => {
                    let node = self.pool.get(id);
                    stack.push(Frame::Descend(node.hi()));
                    stack.push(Frame::Visit(id));
                    stack.push(Frame::Descend(node.lo()));
                }
                Frame::Visit(id) => match self.pool.get(id) {
                    Node::Internal { eq, .. } => {
                        stack.push(Frame::Descend(*eq));
                    }
                    Node::Terminal { payload, .. } => {
                        if payload.get(nchr - 1) == Some(&guard) {
                            out.push(id);
                        }
                    }
                },
            }
        }
    }

    /// In-order traversal over every stored terminal, unfiltered. Backs
    /// `index_traverse` (§6.1).
    pub fn traverse(&self, mut visit: impl FnMut(NodeId)) {
        enum Frame {
            Descend(Option<NodeId>),
            Visit(NodeId),
        }

        let mut stack = vec![Frame::Descend(self.root)];

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Descend(None) => {}
                Frame::Descend(Some(id)) => {
                    let node = self.pool.get(id);
                    stack.push(Frame::Descend(node.hi()));
                    stack.push(Frame::Visit(id));
                    stack.push(Frame::Descend(node.lo()));
                }
                Frame::Visit(id) => match self.pool.get(id) {
                    Node::Internal { eq, .. } => stack.push(Frame::Descend(*eq)),
                    Node::Terminal { .. } => visit(id),
                },
            }
        }
    }

    /// Deletes one occurrence of `key`. Decrements `refcnt`; only removes
    /// tree structure once `refcnt` reaches zero, via unique-suffix collapse
    /// followed by subtree rotation (spec §4.4).
    pub fn delete(&mut self, key: &[u8]) -> Result<DeleteOutcome> {
        if key.len() > MAX_KEY_LEN {
            return Err(Error::KeyTooLong);
        }

        let mut path: Vec<Slot> = Vec::new();
        let mut slot = Slot::Root;
        let mut i = 0usize;
        let sentinel;

        loop {
            let current = match self.slot_get(slot) {
                Some(id) => id,
                None => return Err(Error::NotFound),
            };
            if path.len() >= STKMAX {
                return Err(Error::KeyTooLong);
            }
            path.push(slot);

            let byte = Self::byte_at(key, i);

            match self.pool.get(current) {
                Node::Internal { key: nkey, .. } => {
                    let nkey = *nkey;
                    slot = if byte == nkey {
                        i += 1;
                        Slot::Child(current, Branch::Eq)
                    } else if byte < nkey {
                        Slot::Child(current, Branch::Lo)
                    } else {
                        Slot::Child(current, Branch::Hi)
                    };
                }
                Node::Terminal { .. } => {
                    if byte == 0 {
                        sentinel = current;
                        break;
                    }
                    slot = Slot::Child(current, Branch::Hi);
                }
            }
        }

        let refcnt = match self.pool.get_mut(sentinel) {
            Node::Terminal { refcnt, .. } => {
                *refcnt -= 1;
                *refcnt
            }
            Node::Internal { .. } => unreachable!(),
        };

        if refcnt > 0 {
            return Ok(DeleteOutcome::StillReferenced(refcnt));
        }

        self.len -= 1;

        #[allow(clippy::expect_used, reason = "sentinel was just visited and pushed")]
        let mut pslot = path.pop().expect("delete walk always visits the sentinel");
        let mut victim = sentinel;

        // Unique-suffix collapse: free childless victims, walking back up
        // the path until we hit a node with remaining structure.
        while self.pool.get(victim).is_leaf() {
            self.pool.release(victim);
            self.slot_set(pslot, None);

            pslot = match path.pop() {
                Some(p) => p,
                None => {
                    self.root = None;
                    return Ok(DeleteOutcome::Removed);
                }
            };
            #[allow(clippy::expect_used, reason = "path entries always resolve while walking up")]
            let next = self.slot_get(pslot).expect("ancestor slot resolves to a live node");
            victim = next;
        }

        // Internal node still anchoring another key's eq-chain: done.
        if let Node::Internal { eq: Some(_), .. } = self.pool.get(victim) {
            return Ok(DeleteOutcome::Removed);
        }

        let (lo, hi) = {
            let node = self.pool.get(victim);
            (node.lo(), node.hi())
        };

        let replacement = match (lo, hi) {
            (Some(lo_id), Some(hi_id)) => {
                let lo_hi = self.pool.get(lo_id).hi();
                let hi_lo = self.pool.get(hi_id).lo();

                if lo_hi.is_none() {
                    self.pool.get_mut(lo_id).set_hi(Some(hi_id));
                    Some(lo_id)
                } else if hi_lo.is_none() {
                    self.pool.get_mut(hi_id).set_lo(Some(lo_id));
                    Some(hi_id)
                } else {
                    // Neither rotation is available: leave a tombstone node
                    // with no eq child in place (already the case here).
                    None
                }
            }
            (Some(lo_id), None) => Some(lo_id),
            (None, Some(hi_id)) => Some(hi_id),
            (None, None) => unreachable!("a childless victim is handled by the collapse loop"),
        };

        if let Some(replacement) = replacement {
            self.slot_set(pslot, Some(replacement));
            self.pool.release(victim);
        }

        Ok(DeleteOutcome::Removed)
    }
}

impl<P: Payload> Default for Tst<P> {
    fn default() -> Self {
        Self::new()
    }
}
