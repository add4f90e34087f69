#![no_main]
use autocomplete_tst::{AutocompleteIndex, CopyIndex, FindOutcome, IndexConfig, InsertOutcome};
use libfuzzer_sys::{
    arbitrary::{self, Arbitrary, Unstructured},
    fuzz_target,
};
use std::collections::HashMap;

#[derive(Debug, Arbitrary)]
enum Op {
    Add(Vec<u8>),
    Delete(Vec<u8>),
    Find(Vec<u8>),
}

fuzz_target!(|data: &[u8]| {
    let mut unstructured = Unstructured::new(data);

    let Ok(ops) = <Vec<Op> as Arbitrary>::arbitrary(&mut unstructured) else {
        return;
    };

    let mut index = CopyIndex::new(IndexConfig::default());
    let mut model: HashMap<Vec<u8>, u32> = HashMap::new();

    for op in ops {
        match op {
            Op::Add(key) => {
                if key.is_empty() || key.len() > autocomplete_tst::MAX_KEY_LEN {
                    continue;
                }
                // `SkippedByBloomGate` leaves the tree untouched, so the
                // model must not record the key as present on that outcome.
                match index.add_one(&key) {
                    Ok(InsertOutcome::Inserted(_) | InsertOutcome::Duplicate(_)) => {
                        *model.entry(key).or_insert(0) += 1;
                    }
                    Ok(InsertOutcome::SkippedByBloomGate) | Err(_) => {}
                }
            }
            Op::Delete(key) => {
                if key.is_empty() {
                    continue;
                }
                let Some(count) = model.get_mut(&key) else {
                    continue;
                };
                let outcome = index.delete(&key).expect("key known to the model must be deletable");
                *count -= 1;
                if *count == 0 {
                    model.remove(&key);
                    assert_eq!(outcome, autocomplete_tst::DeleteOutcome::Removed);
                } else {
                    assert_eq!(outcome, autocomplete_tst::DeleteOutcome::StillReferenced(*count));
                }
            }
            Op::Find(key) => {
                let found = matches!(index.find(&key), FindOutcome::Found(_));
                assert_eq!(found, model.contains_key(&key));
            }
        }
    }

    assert_eq!(index.len(), model.len());
});
