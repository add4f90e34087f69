// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! An in-memory autocomplete index over a corpus of short byte strings
//! (city names and similar tokens), built on a ternary search tree with a
//! Bloom filter gate.
//!
//! ##### About
//!
//! A ternary search tree (TST) stores keys byte by byte across a three-way
//! branching trie: every node compares one byte of the key against a stored
//! byte and descends `lo`/`eq`/`hi` accordingly. Lookup and insertion are
//! `O(|key|)` expected; prefix expansion is a bounded in-order traversal from
//! the node matching the prefix's last byte. A companion Bloom filter sits
//! in front of lookups as a cheap, allocation-free negative-answer gate.
//!
//! Two storage modes are fixed at the type level, never mixed at runtime:
//! [`CopyIndex`] duplicates every inserted key into an owned buffer;
//! [`ReferenceIndex`] borrows keys from a caller-owned arena for the
//! lifetime of the index.
//!
//! # Example usage
//!
//! ```
//! use autocomplete_tst::{AutocompleteIndex, CopyIndex, FindOutcome, IndexConfig};
//!
//! let mut index = CopyIndex::new(IndexConfig::default());
//! index.add_one(b"apple")?;
//! index.add_one(b"app")?;
//! index.add_one(b"apricot")?;
//!
//! match index.find(b"apple") {
//!     FindOutcome::Found(handle) => assert_eq!(index.bytes(handle), b"apple"),
//!     other => panic!("expected apple to be found, got {other:?}"),
//! }
//!
//! let mut matches: Vec<&[u8]> = index
//!     .prefix(b"ap", 10)
//!     .into_iter()
//!     .map(|h| index.bytes(h))
//!     .collect();
//! matches.sort_unstable();
//! assert_eq!(matches, vec![b"app".as_slice(), b"apple".as_slice(), b"apricot".as_slice()]);
//! #
//! # Ok::<(), autocomplete_tst::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all, missing_docs, clippy::cargo)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::indexing_slicing)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(clippy::expect_used)]
#![allow(clippy::missing_const_for_fn)]
#![warn(clippy::multiple_crate_versions)]
#![allow(clippy::option_if_let_else)]

pub mod bloom;
mod config;
pub mod corpus;
mod error;
mod index;
mod node_pool;
mod storage_mode;
mod tst;

pub use {
    config::IndexConfig,
    error::{Error, Result},
    index::{AutocompleteIndex, CopyIndex, FindOutcome, Handle, InsertOutcome, ReferenceIndex},
    tst::{DeleteOutcome, MAX_KEY_LEN},
};
