// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Corpus file parsing.
//!
//! Grounded on the original `bench.c`'s `fscanf(dict, "%s", word)` whitespace
//! tokenizing of `cities5000.txt`, and on `test_common.c`'s line-buffer
//! comma-splitting loader for `cities.txt` (the one that replaces `,` and
//! `\n` with `\0` in place and walks the resulting NUL-separated tokens).
//! COPY mode only ever needs one key per line (the whole line, trimmed) to
//! exercise the tree the same way the benchmark harness does; REFERENCE
//! mode reproduces the original's per-field splitting so every field lands
//! in the shared arena as its own borrowed key.

/// Yields one key per non-empty, trimmed line of `cities.txt`-style text —
/// the record granularity COPY-mode loading uses.
pub fn cities_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

/// Yields one key per non-empty comma-separated field across every line of
/// `cities.txt`-style text — the granularity REFERENCE-mode loading uses,
/// since each field is borrowed individually from the caller's arena.
pub fn cities_fields(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .flat_map(|line| line.split(','))
        .map(str::trim)
        .filter(|field| !field.is_empty())
}

/// Yields one key per whitespace-delimited token of `cities5000.txt`-style
/// text, mirroring `fscanf(dict, "%s", word)`.
pub fn whitespace_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// Yields the `(prefix, word)` pairs the benchmark drives: words of at least
/// 4 bytes, paired with their first 3 bytes, exactly as `bench_test` filters
/// and truncates before calling `tst_search_prefix`. The prefix is sliced
/// byte-wise, matching the original's byte semantics — a `str` slice would
/// panic on city names where the 3-byte mark falls inside a multi-byte
/// character (e.g. consecutive accented letters).
pub fn bench_probes(text: &str) -> impl Iterator<Item = (&[u8], &str)> {
    whitespace_tokens(text).filter(|word| word.len() >= 4).map(|word| {
        #[allow(clippy::indexing_slicing)]
        let prefix = &word.as_bytes()[..3];
        (prefix, word)
    })
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn cities_lines_trims_and_skips_blanks() {
        let text = "Paris\n  Berlin  \n\nMadrid\n";
        let lines: Vec<&str> = cities_lines(text).collect();
        assert_eq!(lines, vec!["Paris", "Berlin", "Madrid"]);
    }

    #[test]
    fn cities_fields_splits_on_commas() {
        let text = "Paris,FR,Île-de-France\nBerlin,DE,Berlin\n";
        let fields: Vec<&str> = cities_fields(text).collect();
        assert_eq!(fields, vec!["Paris", "FR", "Île-de-France", "Berlin", "DE", "Berlin"]);
    }

    #[test]
    fn whitespace_tokens_splits_on_any_whitespace() {
        let text = "Paris  Berlin\tMadrid\nRome";
        let tokens: Vec<&str> = whitespace_tokens(text).collect();
        assert_eq!(tokens, vec!["Paris", "Berlin", "Madrid", "Rome"]);
    }

    #[test]
    fn bench_probes_skips_short_words_and_truncates_prefix() {
        let text = "to be or Amsterdam Rotterdam";
        let probes: Vec<(&[u8], &str)> = bench_probes(text).collect();
        assert_eq!(probes, vec![(b"Ams".as_slice(), "Amsterdam"), (b"Rot".as_slice(), "Rotterdam")]);
    }

    #[test]
    fn bench_probes_does_not_panic_when_byte_three_falls_inside_a_character() {
        // Two consecutive two-byte characters put the UTF-8 char boundary at
        // byte offset 2 and 4, never 3 — a `&str` slice of `[..3]` would panic.
        let text = "ÅÅgersund";
        let probes: Vec<(&[u8], &str)> = bench_probes(text).collect();
        assert_eq!(probes.len(), 1);
        assert_eq!(probes[0].0, &"ÅÅgersund".as_bytes()[..3]);
        assert_eq!(probes[0].1, "ÅÅgersund");
    }
}
