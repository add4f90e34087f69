use autocomplete_tst::{AutocompleteIndex, CopyIndex, IndexConfig};
use criterion::{criterion_group, criterion_main, Criterion};

fn sample_words(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("city-{i:08}")).collect()
}

fn insert(c: &mut Criterion) {
    let words = sample_words(100_000);

    c.bench_function("tst insert", |b| {
        b.iter(|| {
            let mut index = CopyIndex::new(IndexConfig::default());
            for word in &words {
                index.add_one(word.as_bytes()).expect("insert should not fail");
            }
        });
    });
}

fn search(c: &mut Criterion) {
    let words = sample_words(100_000);
    let mut index = CopyIndex::new(IndexConfig::default());
    for word in &words {
        index.add_one(word.as_bytes()).expect("insert should not fail");
    }

    c.bench_function("tst search hit", |b| {
        b.iter(|| {
            for word in &words {
                assert!(matches!(index.find(word.as_bytes()), autocomplete_tst::FindOutcome::Found(_)));
            }
        });
    });
}

fn prefix(c: &mut Criterion) {
    let words = sample_words(100_000);
    let mut index = CopyIndex::new(IndexConfig::default());
    for word in &words {
        index.add_one(word.as_bytes()).expect("insert should not fail");
    }

    c.bench_function("tst prefix, 3-byte prefix, max 100", |b| {
        b.iter(|| {
            let matches = index.prefix(b"cit", 100);
            assert!(!matches.is_empty());
        });
    });
}

criterion_group!(benches, insert, search, prefix);
criterion_main!(benches);
