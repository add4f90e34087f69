use autocomplete_tst::{AutocompleteIndex, CopyIndex, FindOutcome, IndexConfig, InsertOutcome};
use test_log::test;

#[test]
fn apple_app_apricot_prefix() -> autocomplete_tst::Result<()> {
    let mut index = CopyIndex::new(IndexConfig::default());
    for word in ["apple", "app", "apricot"] {
        index.add_one(word.as_bytes())?;
    }

    let mut words: Vec<Vec<u8>> = index.prefix(b"ap", 10).into_iter().map(|h| index.bytes(h).to_vec()).collect();
    words.sort();

    assert_eq!(words, vec![b"app".to_vec(), b"apple".to_vec(), b"apricot".to_vec()]);
    Ok(())
}

#[test]
fn duplicate_insert_then_delete_twice() -> autocomplete_tst::Result<()> {
    let mut index = CopyIndex::new(IndexConfig::default());
    index.add_one(b"abc")?;
    assert!(matches!(index.add_one(b"abc")?, InsertOutcome::Duplicate(_)));
    assert!(matches!(index.find(b"abc"), FindOutcome::Found(_)));

    assert_eq!(index.delete(b"abc")?, autocomplete_tst::DeleteOutcome::StillReferenced(1));
    assert!(matches!(index.find(b"abc"), FindOutcome::Found(_)));

    assert_eq!(index.delete(b"abc")?, autocomplete_tst::DeleteOutcome::Removed);
    assert!(matches!(index.find(b"abc"), FindOutcome::NotPresent | FindOutcome::BloomFalsePositive));
    Ok(())
}

#[test]
fn deleting_a_prefix_word_preserves_the_longer_word() -> autocomplete_tst::Result<()> {
    let mut index = CopyIndex::new(IndexConfig::default());
    index.add_one(b"catalog")?;
    index.add_one(b"cat")?;

    assert_eq!(index.delete(b"cat")?, autocomplete_tst::DeleteOutcome::Removed);
    assert!(matches!(index.find(b"cat"), FindOutcome::NotPresent | FindOutcome::BloomFalsePositive));

    match index.find(b"catalog") {
        FindOutcome::Found(handle) => assert_eq!(index.bytes(handle), b"catalog"),
        other => panic!("expected catalog to still be findable, got {other:?}"),
    }
    Ok(())
}

#[test]
fn deleting_with_rotation_preserves_siblings() -> autocomplete_tst::Result<()> {
    let mut index = CopyIndex::new(IndexConfig::default());
    for word in ["bat", "bar", "baz"] {
        index.add_one(word.as_bytes())?;
    }

    assert_eq!(index.delete(b"bar")?, autocomplete_tst::DeleteOutcome::Removed);

    for word in ["bat", "baz"] {
        match index.find(word.as_bytes()) {
            FindOutcome::Found(handle) => assert_eq!(index.bytes(handle), word.as_bytes()),
            other => panic!("expected {word} to still be findable, got {other:?}"),
        }
    }
    Ok(())
}

#[test]
fn key_length_boundary() {
    let mut index = CopyIndex::new(IndexConfig::default());

    let too_long = vec![b'x'; 128];
    assert!(matches!(index.add_one(&too_long), Err(autocomplete_tst::Error::KeyTooLong)));

    let exactly_at_limit = vec![b'y'; 127];
    assert!(index.add_one(&exactly_at_limit).is_ok());
}
