use autocomplete_tst::{AutocompleteIndex, FindOutcome, IndexConfig, ReferenceIndex};
use test_log::test;

#[test]
fn reference_mode_never_copies_the_corpus() -> autocomplete_tst::Result<()> {
    let arena = b"newyork\0newark\0newport\0boston\0".to_vec();
    let mut index = ReferenceIndex::new(IndexConfig::default());

    let mut offset = 0;
    for word in arena.split(|&b| b == 0) {
        if word.is_empty() {
            continue;
        }
        index.add_one(&arena[offset..offset + word.len()])?;
        offset += word.len() + 1;
    }

    let ptr_range = arena.as_ptr_range();
    for handle in index.prefix(b"new", 100) {
        let bytes = index.bytes(handle);
        assert!(ptr_range.contains(&bytes.as_ptr()), "returned bytes must borrow from the arena");
    }

    match index.find(b"boston") {
        FindOutcome::Found(handle) => {
            assert!(ptr_range.contains(&index.bytes(handle).as_ptr()));
        }
        other => panic!("expected boston to be found, got {other:?}"),
    }

    Ok(())
}

#[test]
fn reference_mode_delete_does_not_require_the_arena_mutably() -> autocomplete_tst::Result<()> {
    let arena = b"alpha\0beta\0gamma\0".to_vec();
    let mut index = ReferenceIndex::new(IndexConfig::default());

    let mut offset = 0;
    for word in arena.split(|&b| b == 0) {
        if word.is_empty() {
            continue;
        }
        index.add_one(&arena[offset..offset + word.len()])?;
        offset += word.len() + 1;
    }

    assert_eq!(index.delete(b"beta")?, autocomplete_tst::DeleteOutcome::Removed);
    assert!(matches!(index.find(b"alpha"), FindOutcome::Found(_)));
    assert!(matches!(index.find(b"gamma"), FindOutcome::Found(_)));

    Ok(())
}
