// ==============================================
// TABLE PROPERTY TESTS (integration)
// ==============================================
//
// Random insert streams checked against an FxHashMap reference model.

use proptest::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

use wordtable::hash::HashFunction;
use wordtable::table::WordTable;

fn hash_function() -> impl Strategy<Value = HashFunction> {
    (1u32..=6).prop_map(|id| HashFunction::try_from(id).unwrap())
}

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

proptest! {
    /// Property: hash_code always lands inside the bucket array
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_hash_code_in_range(
        f in hash_function(),
        capacity in 1usize..5000,
        key in any::<String>()
    ) {
        let table = WordTable::with_hash_function(capacity, f).unwrap();
        prop_assert!(table.hash_code(&key) < capacity);
    }

    /// Property: frequencies and counters match a reference map
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_counts_match_reference(
        f in hash_function(),
        capacity in 1usize..64,
        words in prop::collection::vec(word(), 0..300)
    ) {
        let mut table = WordTable::with_hash_function(capacity, f).unwrap();
        let mut expected: FxHashMap<&str, u64> = FxHashMap::default();

        for w in &words {
            table.insert(w);
            *expected.entry(w.as_str()).or_default() += 1;
        }

        prop_assert_eq!(table.unique_words(), expected.len() as u64);
        prop_assert_eq!(table.total_words(), words.len() as u64);
        for (w, count) in &expected {
            prop_assert_eq!(table.find_freq(w), *count);
        }
        let chained: usize = table.buckets().iter().map(|b| b.len()).sum();
        prop_assert_eq!(chained as u64, table.unique_words());
        prop_assert!(table.check_invariants().is_ok());
    }

    /// Property: collisions grow by one exactly when a new word enters an
    /// occupied bucket
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_collisions_track_occupied_inserts(
        f in hash_function(),
        capacity in 1usize..16,
        words in prop::collection::vec(word(), 0..150)
    ) {
        let mut table = WordTable::with_hash_function(capacity, f).unwrap();
        let mut seen: FxHashSet<String> = FxHashSet::default();

        for w in &words {
            let bucket = table.hash_code(w);
            let occupied = !table.buckets()[bucket].is_empty();
            let is_new = !seen.contains(w);
            let before = table.collisions();

            table.insert(w);
            seen.insert(w.clone());

            let expected = before + u64::from(is_new && occupied);
            prop_assert_eq!(table.collisions(), expected);
        }
    }

    /// Property: the heap root is always a longest chain
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_heap_root_is_longest_chain(
        f in hash_function(),
        capacity in 1usize..32,
        words in prop::collection::vec(word(), 1..200)
    ) {
        let mut table = WordTable::with_hash_function(capacity, f).unwrap();
        for w in &words {
            table.insert(w);
            let root = table.heap().peek_max().unwrap();
            let longest = table.buckets().iter().map(|b| b.len()).max().unwrap();
            prop_assert_eq!(table.buckets()[root].len(), longest);
        }
    }
}
