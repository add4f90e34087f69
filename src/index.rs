// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! The public façade binding the TST and Bloom filter into one query surface.
//!
//! Two concrete types, [`CopyIndex`] and [`ReferenceIndex`], fix the
//! storage mode at the type level (see [`crate::storage_mode`]) and share the
//! read/delete/traversal surface through [`AutocompleteIndex`]. `insert`
//! itself is not part of that trait: COPY takes an owned-or-borrowed `&[u8]`
//! it will duplicate, REFERENCE takes `&'data [u8]` it will only borrow, and
//! unifying those under one generic trait method would need a GAT for no
//! real benefit here, so each façade exposes its own `add_one`/`load`
//! inherent methods instead.

use crate::bloom::Bloom;
use crate::config::IndexConfig;
use crate::node_pool::NodeId;
use crate::tst::{DeleteOutcome, Tst};
use crate::{Error, Result};

/// A stable reference to a key stored in an index, returned by `insert`/`find`/`prefix`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handle(pub(crate) NodeId);

/// Outcome of [`CopyIndex::add_one`]/[`ReferenceIndex::add_one`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new key was inserted.
    Inserted(Handle),
    /// The key already existed; its reference count was incremented.
    Duplicate(Handle),
    /// The Bloom filter reported the key as possibly present, so the insert
    /// was skipped without consulting the tree (see spec §4.6 on `add_one`).
    SkippedByBloomGate,
}

/// Outcome of a `find` query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindOutcome {
    /// The key is stored; here is its handle.
    Found(Handle),
    /// The Bloom filter gave a definitive negative.
    NotPresent,
    /// The Bloom filter said "maybe" but the tree disagreed.
    BloomFalsePositive,
}

/// Operations common to both storage modes: reads, deletion, and traversal.
///
/// Not object-safe (the generic `traverse` parameter rules out `dyn`), which
/// is fine — nothing here needs dynamic dispatch across the two modes.
pub trait AutocompleteIndex {
    /// Looks up `key`, consulting the Bloom filter first.
    fn find(&self, key: &[u8]) -> FindOutcome;

    /// Collects up to `max` stored keys beginning with `prefix`, in the
    /// tree's in-order traversal order. Empty for an empty prefix or no
    /// matches.
    fn prefix(&self, prefix: &[u8], max: usize) -> Vec<Handle>;

    /// Removes one occurrence of `key`. The Bloom filter is never updated;
    /// see the module doc on the non-counting Bloom-delete hazard.
    fn delete(&mut self, key: &[u8]) -> Result<DeleteOutcome>;

    /// In-order traversal over every stored key.
    fn traverse(&self, visit: impl FnMut(&[u8]));

    /// Number of distinct keys (duplicates count once).
    fn len(&self) -> usize;

    /// `true` iff the index holds no keys.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolves a handle back to its stored bytes.
    fn bytes(&self, handle: Handle) -> &[u8];
}

/// COPY-mode index: every stored key is duplicated into an owned `Box<[u8]>`
/// on insert. Callers don't need to keep the input alive afterward.
pub struct CopyIndex {
    tst: Tst<Box<[u8]>>,
    bloom: Bloom,
}

impl CopyIndex {
    /// Creates an empty index with the given Bloom filter sizing.
    #[must_use]
    pub fn new(config: IndexConfig) -> Self {
        Self {
            tst: Tst::new(),
            bloom: Bloom::new(config.bloom_bits),
        }
    }

    /// Bulk-loads `keys`, inserting each unconditionally (no Bloom gate) and
    /// registering it with the Bloom filter on success. Aborts on the first
    /// `OutOfMemory`; `KeyTooLong` keys are skipped and counted.
    ///
    /// Returns the number of keys successfully inserted (fresh or duplicate).
    pub fn load<'k>(&mut self, keys: impl IntoIterator<Item = &'k [u8]>) -> Result<usize> {
        let mut loaded = 0;
        for key in keys {
            match self.tst.insert(key, || key.to_vec().into_boxed_slice()) {
                Ok(_) => {
                    self.bloom.add(key);
                    loaded += 1;
                }
                Err(Error::KeyTooLong) => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(loaded)
    }

    /// Inserts one key, gated by the Bloom filter: if the filter already
    /// reports `key` as possibly present, the tree is not consulted at all
    /// (a known compromise — see [`InsertOutcome::SkippedByBloomGate`]).
    pub fn add_one(&mut self, key: &[u8]) -> Result<InsertOutcome> {
        if self.bloom.test(key) {
            return Ok(InsertOutcome::SkippedByBloomGate);
        }

        let (id, fresh) = self.tst.insert(key, || key.to_vec().into_boxed_slice())?;
        self.bloom.add(key);

        Ok(if fresh {
            InsertOutcome::Inserted(Handle(id))
        } else {
            InsertOutcome::Duplicate(Handle(id))
        })
    }
}

impl AutocompleteIndex for CopyIndex {
    fn find(&self, key: &[u8]) -> FindOutcome {
        if !self.bloom.test(key) {
            return FindOutcome::NotPresent;
        }
        match self.tst.search(key) {
            Some(id) => FindOutcome::Found(Handle(id)),
            None => FindOutcome::BloomFalsePositive,
        }
    }

    fn prefix(&self, prefix: &[u8], max: usize) -> Vec<Handle> {
        self.tst
            .search_prefix(prefix, max)
            .map(|ids| ids.into_iter().map(Handle).collect())
            .unwrap_or_default()
    }

    fn delete(&mut self, key: &[u8]) -> Result<DeleteOutcome> {
        self.tst.delete(key)
    }

    fn traverse(&self, mut visit: impl FnMut(&[u8])) {
        self.tst.traverse(|id| visit(self.tst.bytes(id)));
    }

    fn len(&self) -> usize {
        self.tst.len()
    }

    fn bytes(&self, handle: Handle) -> &[u8] {
        self.tst.bytes(handle.0)
    }
}

/// REFERENCE-mode index: every stored key borrows from a caller-owned arena
/// of lifetime `'data`. No per-key allocation happens on insert.
pub struct ReferenceIndex<'data> {
    tst: Tst<&'data [u8]>,
    bloom: Bloom,
}

impl<'data> ReferenceIndex<'data> {
    /// Creates an empty index with the given Bloom filter sizing.
    #[must_use]
    pub fn new(config: IndexConfig) -> Self {
        Self {
            tst: Tst::new(),
            bloom: Bloom::new(config.bloom_bits),
        }
    }

    /// Bulk-loads `keys`, each borrowed for `'data`, inserting each
    /// unconditionally and registering it with the Bloom filter on success.
    pub fn load(&mut self, keys: impl IntoIterator<Item = &'data [u8]>) -> Result<usize> {
        let mut loaded = 0;
        for key in keys {
            match self.tst.insert(key, || key) {
                Ok(_) => {
                    self.bloom.add(key);
                    loaded += 1;
                }
                Err(Error::KeyTooLong) => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(loaded)
    }

    /// Inserts one borrowed key, gated by the Bloom filter exactly as
    /// [`CopyIndex::add_one`].
    pub fn add_one(&mut self, key: &'data [u8]) -> Result<InsertOutcome> {
        if self.bloom.test(key) {
            return Ok(InsertOutcome::SkippedByBloomGate);
        }

        let (id, fresh) = self.tst.insert(key, || key)?;
        self.bloom.add(key);

        Ok(if fresh {
            InsertOutcome::Inserted(Handle(id))
        } else {
            InsertOutcome::Duplicate(Handle(id))
        })
    }
}

impl AutocompleteIndex for ReferenceIndex<'_> {
    fn find(&self, key: &[u8]) -> FindOutcome {
        if !self.bloom.test(key) {
            return FindOutcome::NotPresent;
        }
        match self.tst.search(key) {
            Some(id) => FindOutcome::Found(Handle(id)),
            None => FindOutcome::BloomFalsePositive,
        }
    }

    fn prefix(&self, prefix: &[u8], max: usize) -> Vec<Handle> {
        self.tst
            .search_prefix(prefix, max)
            .map(|ids| ids.into_iter().map(Handle).collect())
            .unwrap_or_default()
    }

    fn delete(&mut self, key: &[u8]) -> Result<DeleteOutcome> {
        self.tst.delete(key)
    }

    fn traverse(&self, mut visit: impl FnMut(&[u8])) {
        self.tst.traverse(|id| visit(self.tst.bytes(id)));
    }

    fn len(&self) -> usize {
        self.tst.len()
    }

    fn bytes(&self, handle: Handle) -> &[u8] {
        self.tst.bytes(handle.0)
    }
}
