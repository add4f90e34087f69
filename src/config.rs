// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Index configuration builder.
//!
//! Grounded on the reference crate's own `Config` (`src/config.rs`): a
//! `Default` baseline plus chained `#[must_use]` setters, each documenting
//! its default and any panicking precondition.

/// Builder for the Bloom filter sizing used by a newly created index.
///
/// Only the Bloom filter is configurable (spec §2's "Configuration" ambient
/// layer): the TST itself has no tunable parameters.
#[derive(Clone, Copy, Debug)]
pub struct IndexConfig {
    /// Number of bits in the Bloom filter's bit array.
    pub(crate) bloom_bits: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            // 5,000,000 bits comfortably covers a ~128k-entry city corpus
            // (see the false-positive-bound property) at two hash functions.
            bloom_bits: 5_000_000,
        }
    }
}

impl IndexConfig {
    /// Initializes a config with the default Bloom filter size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of bits in the Bloom filter's bit array.
    ///
    /// Larger values lower the false-positive rate at the cost of memory;
    /// see [`crate::bloom::Bloom::false_positive_rate`].
    ///
    /// Defaults to 5,000,000 bits (~610 KiB).
    ///
    /// # Panics
    ///
    /// Panics if `bits` is 0.
    #[must_use]
    pub fn bloom_bits(mut self, bits: usize) -> Self {
        assert!(bits > 0, "bloom filter must have at least one bit");

        self.bloom_bits = bits;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn default_matches_documented_size() {
        assert_eq!(IndexConfig::default().bloom_bits, 5_000_000);
    }

    #[test]
    fn builder_overrides_bloom_bits() {
        let config = IndexConfig::new().bloom_bits(1_024);
        assert_eq!(config.bloom_bits, 1_024);
    }

    #[test]
    #[should_panic(expected = "at least one bit")]
    fn zero_bloom_bits_panics() {
        let _ = IndexConfig::new().bloom_bits(0);
    }
}
