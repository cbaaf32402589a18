mod common;

use common::*;
use iterkit::{
    accumulate, deepflatten, intersperse, replicate, successive, unique_everseen,
    DeepFlattenConfig, Resumable, Source, Value,
};
use proptest::prelude::*;

fn small_ints() -> impl Strategy<Value = Vec<i64>> {
    proptest::collection::vec(-8i64..8, 0..40)
}

/// Advance an iterator over `items` by `split`, snapshot it, and check that a
/// fresh iterator restored from the snapshot over the unconsumed upstream
/// yields exactly what the original still yields.
fn restored_iterator_continues<T, F>(
    make: F,
    items: &[i64],
    split: usize,
) -> Result<(), TestCaseError>
where
    T: Resumable,
    F: Fn(&Value) -> T,
{
    let upstream = handle(ints(items));
    let mut it = make(&Value::Iter(upstream.clone()));
    for _ in 0..split {
        it.advance().expect("item");
    }
    let state = it.capture_state();
    let rest = upstream.fork().expect("forkable");
    let expected = drain(&mut it);

    let mut fresh = make(&Value::Iter(rest));
    fresh.restore_state(&state).expect("valid snapshot");
    prop_assert_eq!(fresh.capture_state(), state);
    prop_assert_eq!(drain(&mut fresh), expected);
    Ok(())
}

proptest! {
    #[test]
    fn unique_everseen_keeps_first_occurrences(items in small_ints()) {
        let mut it = unique_everseen(&Value::list(ints(&items)), None).expect("iterable");
        let got = drain(&mut it);

        let mut expected = Vec::new();
        for item in &items {
            if !expected.contains(item) {
                expected.push(*item);
            }
        }
        prop_assert_eq!(got, ints(&expected));
    }

    #[test]
    fn successive_yields_overlapping_windows(items in small_ints(), times in 1usize..6) {
        let mut it = successive(&Value::list(ints(&items)), times).expect("valid width");
        let got = drain(&mut it);
        let expected: Vec<Value> = items
            .windows(times)
            .map(|w| Value::tuple(ints(w)))
            .collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn replicate_repeats_each_item(items in small_ints(), times in 2usize..5) {
        let mut it = replicate(&Value::list(ints(&items)), times).expect("valid count");
        let got = drain(&mut it);
        prop_assert_eq!(got.len(), items.len() * times);
        for (chunk, item) in got.chunks(times).zip(&items) {
            prop_assert!(chunk.iter().all(|x| *x == Value::Int(*item)));
        }
    }

    #[test]
    fn length_hints_count_down_exactly(items in small_ints(), times in 2usize..4) {
        let source = Value::list(ints(&items));
        let mut sources: Vec<Box<dyn Source>> = vec![
            Box::new(replicate(&source, times).expect("valid count")),
            Box::new(intersperse(&source, Value::None).expect("iterable")),
            Box::new(successive(&source, times).expect("valid width")),
        ];
        for it in sources.iter_mut() {
            let mut hint = it.length_hint().expect("hint");
            while it.advance().expect("item").is_some() {
                let next = it.length_hint().expect("hint");
                prop_assert_eq!(next + 1, hint);
                hint = next;
            }
            prop_assert_eq!(hint, 0);
        }
    }

    #[test]
    fn checkpoint_continues_like_the_original(items in small_ints(), split in 0usize..40) {
        let mut it = replicate(&Value::list(ints(&items)), 2).expect("valid count");
        for _ in 0..split {
            it.advance().expect("item");
        }
        let mut copy = it.checkpoint().expect("forkable");
        prop_assert_eq!(drain(&mut copy), drain(&mut it));
    }

    #[test]
    fn snapshot_resumes_where_it_left_off(items in small_ints(), split in 0usize..40, times in 1usize..4) {
        restored_iterator_continues(|src| accumulate(src, None, None).expect("iterable"), &items, split)?;
        restored_iterator_continues(|src| intersperse(src, Value::None).expect("iterable"), &items, split)?;
        restored_iterator_continues(|src| replicate(src, times).expect("valid count"), &items, split)?;
        restored_iterator_continues(|src| successive(src, times).expect("valid width"), &items, split)?;
    }

    #[test]
    fn deepflatten_snapshot_resumes_where_it_left_off(
        groups in proptest::collection::vec(small_ints(), 0..8),
        split in 0usize..40,
    ) {
        let nested = Value::list(groups.iter().map(|g| Value::list([Value::list(ints(g))])));
        let mut it = deepflatten(&nested, DeepFlattenConfig::default()).expect("iterable");
        for _ in 0..split {
            it.advance().expect("item");
        }
        let state = it.capture_state();
        let expected = drain(&mut it);

        let fresh = deepflatten(&Value::list([]), DeepFlattenConfig::default()).expect("iterable");
        let mut fresh = restored(fresh, &state);
        prop_assert_eq!(drain(&mut fresh), expected);
    }

    #[test]
    fn flattening_nested_lists_preserves_leaf_order(groups in proptest::collection::vec(small_ints(), 0..8)) {
        let nested = Value::list(groups.iter().map(|g| Value::list([Value::list(ints(g))])));
        let mut it = deepflatten(&nested, DeepFlattenConfig::default()).expect("iterable");
        let expected: Vec<i64> = groups.concat();
        prop_assert_eq!(drain(&mut it), ints(&expected));
    }
}
