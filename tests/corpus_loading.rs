use autocomplete_tst::corpus::{bench_probes, cities_fields, cities_lines, whitespace_tokens};
use autocomplete_tst::{AutocompleteIndex, CopyIndex, FindOutcome, IndexConfig};
use std::io::Write;
use test_log::test;

#[test]
fn loads_one_key_per_line_in_copy_mode() -> autocomplete_tst::Result<()> {
    let mut file = tempfile::NamedTempFile::new().expect("can create temp file");
    writeln!(file, "Paris,FR,Île-de-France").expect("can write");
    writeln!(file, "Berlin,DE,Berlin").expect("can write");

    let text = std::fs::read_to_string(file.path()).expect("can read back");
    let mut index = CopyIndex::new(IndexConfig::default());
    let loaded = index.load(cities_lines(&text).map(str::as_bytes))?;

    assert_eq!(loaded, 2);
    assert!(matches!(index.find(b"Paris,FR,\u{c8}le-de-France".as_bytes()), FindOutcome::NotPresent | FindOutcome::BloomFalsePositive));
    Ok(())
}

#[test]
fn cities_fields_yield_one_key_per_comma_separated_token() {
    let text = "Paris,FR\nBerlin,DE\n";
    let fields: Vec<&str> = cities_fields(text).collect();
    assert_eq!(fields, vec!["Paris", "FR", "Berlin", "DE"]);
}

#[test]
fn whitespace_tokens_feed_the_bench_probe_filter() {
    let text = "to be Amsterdam Rotterdam";
    let tokens: Vec<&str> = whitespace_tokens(text).collect();
    assert_eq!(tokens, vec!["to", "be", "Amsterdam", "Rotterdam"]);

    let probes: Vec<(&[u8], &str)> = bench_probes(text).collect();
    assert_eq!(probes, vec![(b"Ams".as_slice(), "Amsterdam"), (b"Rot".as_slice(), "Rotterdam")]);
}

#[test]
fn end_to_end_load_and_prefix_query() -> autocomplete_tst::Result<()> {
    let text = "Amsterdam\nRotterdam\nUtrecht\n";
    let mut index = CopyIndex::new(IndexConfig::default());
    let loaded = index.load(cities_lines(text).map(str::as_bytes))?;
    assert_eq!(loaded, 3);

    let matches = index.prefix(b"U", 10);
    assert_eq!(matches.len(), 1);
    assert_eq!(index.bytes(matches[0]), b"Utrecht");
    Ok(())
}
