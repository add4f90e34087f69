// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! A fixed-size, non-counting Bloom filter over an ordered list of named hash
//! functions.
//!
//! Grounded on `bloom.c`/`bloom.h`: an `m`-bit array and an ordered list of
//! hash functions (`djb2`, `jenkins`, by default both), `add` sets bit
//! `hash(key) % m` for every hash, `test` returns true iff all such bits are
//! set. The MSB-first bit addressing in [`bit_array`] is carried over from
//! the reference crate's own Bloom filter, which already uses the identical
//! scheme.
//!
//! Unlike the reference crate's filter (which hashes twice with `xxh3` and
//! derives `k` probe positions via double hashing, for an on-disk, decodable
//! filter), this one keeps the original's two *named* hash functions as
//! first-class, distinguishable algorithms, since nothing here is persisted
//! or decoded back.

mod bit_array;

use bit_array::BitArray;

/// djb2, Bernstein's hash — see `bloom.c`.
fn djb2(bytes: &[u8]) -> u32 {
    let mut hash: u32 = 5381;
    for &b in bytes {
        hash = hash.wrapping_shl(5).wrapping_add(hash).wrapping_add(u32::from(b));
    }
    hash
}

/// Jenkins' one-at-a-time hash — see `bloom.c`.
fn jenkins(bytes: &[u8]) -> u32 {
    let mut hash: u32 = 0;
    for &b in bytes {
        hash = hash.wrapping_add(u32::from(b));
        hash = hash.wrapping_add(hash.wrapping_shl(10));
        hash ^= hash >> 6;
    }
    hash = hash.wrapping_add(hash.wrapping_shl(3));
    hash ^= hash >> 11;
    hash = hash.wrapping_add(hash.wrapping_shl(15));
    hash
}

/// One of the filter's named hash functions.
type HashFn = fn(&[u8]) -> u32;

const DEFAULT_HASHES: &[HashFn] = &[djb2, jenkins];

/// A fixed-size Bloom filter: `m` bits addressed by an ordered list of `h`
/// hash functions (two by default, matching the original).
///
/// No false negatives: once a key has been added, `test` always returns
/// `true` for it. False positives are possible and their rate is governed by
/// `m`, `h`, and the number of keys added — see [`Bloom::false_positive_rate`].
/// There is no `remove`: clearing bits for one key could clear bits shared by
/// another, reintroducing false negatives, so deletion is simply unsupported
/// (spec Non-goals).
pub struct Bloom {
    bits: BitArray,
    m: usize,
    hashes: &'static [HashFn],
    inserted: usize,
}

impl Bloom {
    /// Creates a filter with `m` bits and the default two hash functions
    /// (djb2, Jenkins one-at-a-time).
    #[must_use]
    pub fn new(m: usize) -> Self {
        Self::with_hashes(m, DEFAULT_HASHES)
    }

    fn with_hashes(m: usize, hashes: &'static [HashFn]) -> Self {
        let m = m.max(1);
        Self {
            bits: BitArray::with_capacity(m.div_ceil(8)),
            m,
            hashes,
            inserted: 0,
        }
    }

    /// Number of bits in the filter.
    #[must_use]
    pub fn bit_count(&self) -> usize {
        self.m
    }

    /// Number of hash functions (`h`).
    #[must_use]
    pub fn hash_count(&self) -> usize {
        self.hashes.len()
    }

    /// Number of keys added so far, for the false-positive-rate estimate.
    #[must_use]
    pub fn inserted_count(&self) -> usize {
        self.inserted
    }

    /// Sets one bit per hash function for `key`.
    pub fn add(&mut self, key: &[u8]) {
        for hash in self.hashes {
            let bit = (hash(key) as usize) % self.m;
            self.bits.set(bit, true);
        }
        self.inserted += 1;
    }

    /// Tests for membership. `true` means "possibly present"; `false` means
    /// "definitely absent".
    #[must_use]
    pub fn test(&self, key: &[u8]) -> bool {
        self.hashes
            .iter()
            .all(|hash| self.bits.get((hash(key) as usize) % self.m))
    }

    /// The theoretical false-positive rate `(1 - e^(-hn/m))^h` for `n` keys
    /// inserted so far, `h` hash functions, and `m` bits. Advisory only: the
    /// formula assumes independent, uniformly distributed hashes.
    #[must_use]
    pub fn false_positive_rate(&self) -> f64 {
        #[allow(clippy::cast_precision_loss, reason = "advisory estimate, not an exact count")]
        let (h, n, m) = (self.hashes.len() as f64, self.inserted as f64, self.m as f64);
        (1.0 - (-h * n / m).exp()).powf(h)
    }
}
