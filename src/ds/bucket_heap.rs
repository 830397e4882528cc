//! Max-heap of bucket indices ranked by chain length.
//!
//! The heap never owns chains. Each slot stores the index of a bucket in the
//! table's `Vec<BucketChain>`, and every comparison reads the chain length
//! through the slice passed in by the caller. A per-bucket `positions` array
//! records the slot each bucket occupies, so a bucket is stored at most once
//! and can be sifted in place when its chain grows.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────────┐
//! │  buckets: [BucketChain] (owned by WordTable)                          │
//! │     0: ["cat"]   1: []   2: ["the","fox","dog"]   3: ["a","an"]        │
//! │                                                                       │
//! │  BucketHeap                                                           │
//! │     slots:     [ _ | 2 | 3 | 0 ]     (1-indexed, slot 0 unused)       │
//! │                      │   │   └── len 1                                │
//! │                      │   └────── len 2                                │
//! │                      └────────── len 3  ← root (longest chain)        │
//! │     positions: [ Some(3), None, Some(1), Some(2) ]                    │
//! └───────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation     | Description                              | Complexity |
//! |---------------|------------------------------------------|------------|
//! | `insert`      | Add a bucket, or sift it up if present   | O(log n)   |
//! | `get_max`     | Head key of the longest chain            | O(1)       |
//! | `remove_max`  | Pop the longest chain's bucket index     | O(log n)   |
//! | `repair`      | Corrective sift pass over the top half   | O(n log n) |
//! | `sort`        | Consume into descending-length order     | O(n log n) |
//!
//! ## Example Usage
//!
//! ```
//! use wordtable::ds::{BucketChain, BucketHeap};
//!
//! let mut buckets: Vec<BucketChain> = (0..3).map(|_| BucketChain::new()).collect();
//! buckets[0].insert("solo", 1);
//! buckets[2].insert("first", 1);
//! buckets[2].insert("second", 1);
//!
//! let mut heap = BucketHeap::new(buckets.len());
//! heap.insert(0, &buckets).unwrap();
//! heap.insert(2, &buckets).unwrap();
//!
//! assert_eq!(heap.get_max(&buckets).unwrap(), "first");
//! assert_eq!(heap.remove_max(&buckets).unwrap(), 2);
//! assert_eq!(heap.remove_max(&buckets).unwrap(), 0);
//! assert!(heap.remove_max(&buckets).is_err());
//! ```
//!
//! ## Thread Safety
//!
//! `BucketHeap` is not thread-safe.

use crate::ds::chain::BucketChain;
use crate::error::{InvariantError, TableError};

const SENTINEL: usize = usize::MAX;

/// Binary max-heap over bucket indices, keyed by chain length.
///
/// Ties are left in place: a child only moves above its parent when its
/// chain is strictly longer.
#[derive(Debug, Clone)]
pub struct BucketHeap {
    slots: Vec<usize>,
    positions: Vec<Option<usize>>,
}

impl BucketHeap {
    /// Creates an empty heap for a table with `bucket_count` buckets.
    pub fn new(bucket_count: usize) -> Self {
        let mut slots = Vec::with_capacity(bucket_count + 1);
        slots.push(SENTINEL);
        Self {
            slots,
            positions: vec![None; bucket_count],
        }
    }

    /// Index of the parent of slot `k`.
    #[inline]
    pub const fn parent(k: usize) -> usize {
        k / 2
    }

    /// Index of the left child of slot `k`.
    #[inline]
    pub const fn left(k: usize) -> usize {
        2 * k
    }

    /// Index of the right child of slot `k`.
    #[inline]
    pub const fn right(k: usize) -> usize {
        2 * k + 1
    }

    /// Returns the number of buckets in the heap.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len() - 1
    }

    /// Returns `true` if the heap holds no buckets.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the slot occupied by `bucket`, if it is in the heap.
    #[inline]
    pub fn position(&self, bucket: usize) -> Option<usize> {
        self.positions.get(bucket).copied().flatten()
    }

    /// Returns `true` if `bucket` has a heap slot.
    #[inline]
    pub fn contains(&self, bucket: usize) -> bool {
        self.position(bucket).is_some()
    }

    /// Returns the root bucket index without removing it.
    #[inline]
    pub fn peek_max(&self) -> Option<usize> {
        self.slots.get(1).copied()
    }

    /// Iterates bucket indices in storage (slot) order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots[1..].iter().copied()
    }

    /// Adds `bucket` to the heap and restores the heap property.
    ///
    /// A bucket that already has a slot is sifted up from where it is rather
    /// than stored a second time.
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidArgument`] if `bucket` is not an index into
    /// `buckets`. The heap is left unchanged.
    pub fn insert(&mut self, bucket: usize, buckets: &[BucketChain]) -> Result<(), TableError> {
        if bucket >= buckets.len() {
            return Err(TableError::invalid_argument(format!(
                "bucket {bucket} out of range for {} buckets",
                buckets.len()
            )));
        }
        if let Some(slot) = self.position(bucket) {
            self.bubble_up(slot, buckets);
            return Ok(());
        }
        if bucket >= self.positions.len() {
            self.positions.resize(bucket + 1, None);
        }
        self.slots.push(bucket);
        let slot = self.slots.len() - 1;
        self.positions[bucket] = Some(slot);
        self.bubble_up(slot, buckets);
        Ok(())
    }

    /// Returns the key at the head of the root bucket's chain.
    ///
    /// # Errors
    ///
    /// [`TableError::EmptyCollection`] if the heap (or its root chain) is empty.
    pub fn get_max<'a>(&self, buckets: &'a [BucketChain]) -> Result<&'a str, TableError> {
        let root = self.peek_max().ok_or(TableError::EmptyCollection)?;
        buckets
            .get(root)
            .and_then(BucketChain::first)
            .map(|entry| entry.key())
            .ok_or(TableError::EmptyCollection)
    }

    /// Removes and returns the root bucket index.
    ///
    /// # Errors
    ///
    /// [`TableError::EmptyCollection`] if the heap is empty.
    pub fn remove_max(&mut self, buckets: &[BucketChain]) -> Result<usize, TableError> {
        if self.is_empty() {
            return Err(TableError::EmptyCollection);
        }
        let last = self.slots.len() - 1;
        self.swap(1, last);
        let max = self.slots.pop().ok_or(TableError::EmptyCollection)?;
        self.positions[max] = None;
        if !self.is_empty() {
            self.bubble_down(1, buckets);
        }
        Ok(max)
    }

    /// Moves slot `k` toward the root while its chain is longer than its parent's.
    pub fn bubble_up(&mut self, mut k: usize, buckets: &[BucketChain]) {
        while k > 1 && self.size_at(k, buckets) > self.size_at(Self::parent(k), buckets) {
            self.swap(k, Self::parent(k));
            k = Self::parent(k);
        }
    }

    /// Moves slot `k` toward the leaves while a child's chain is longer.
    pub fn bubble_down(&mut self, mut k: usize, buckets: &[BucketChain]) {
        let len = self.slots.len();
        loop {
            let mut biggest = k;
            let mut biggest_size = self.size_at(k, buckets);
            for child in [Self::left(k), Self::right(k)] {
                if child < len && self.size_at(child, buckets) > biggest_size {
                    biggest = child;
                    biggest_size = self.size_at(child, buckets);
                }
            }
            if biggest == k {
                return;
            }
            self.swap(k, biggest);
            k = biggest;
        }
    }

    /// Runs one corrective pass (`bubble_down` then `bubble_up`) over the
    /// first half of the slots.
    pub fn repair(&mut self, buckets: &[BucketChain]) {
        for k in 1..=self.len() / 2 {
            self.bubble_down(k, buckets);
            self.bubble_up(k, buckets);
        }
    }

    /// Consumes the heap, returning bucket indices by descending chain length.
    ///
    /// This is a terminal operation. Callers that need to keep ranking after
    /// sorting should sort a clone.
    pub fn sort(mut self, buckets: &[BucketChain]) -> Vec<usize> {
        let mut sorted = Vec::with_capacity(self.len());
        while let Ok(bucket) = self.remove_max(buckets) {
            sorted.push(bucket);
        }
        sorted
    }

    /// Renders the first `limit` slots level by level as `key[len]`.
    ///
    /// # Example
    ///
    /// ```
    /// use wordtable::ds::{BucketChain, BucketHeap};
    ///
    /// let mut buckets: Vec<BucketChain> = (0..2).map(|_| BucketChain::new()).collect();
    /// buckets[0].insert("a", 1);
    /// buckets[1].insert("b", 1);
    /// buckets[1].insert("c", 1);
    ///
    /// let mut heap = BucketHeap::new(2);
    /// heap.insert(0, &buckets).unwrap();
    /// heap.insert(1, &buckets).unwrap();
    /// assert_eq!(heap.render(&buckets, 15), "b[2]\na[1]\n");
    /// ```
    pub fn render(&self, buckets: &[BucketChain], limit: usize) -> String {
        let shown = self.len().min(limit);
        let mut out = String::new();
        let mut level_start = 1;
        while level_start <= shown {
            let level_end = (level_start * 2 - 1).min(shown);
            let line: Vec<String> = (level_start..=level_end)
                .map(|k| {
                    let chain = buckets.get(self.slots[k]);
                    let key = chain.and_then(BucketChain::first).map_or("-", |entry| entry.key());
                    format!("{key}[{}]", self.size_at(k, buckets))
                })
                .collect();
            out.push_str(&line.join("  "));
            out.push('\n');
            level_start *= 2;
        }
        out
    }

    /// Validates the heap property and the `positions` index.
    pub fn check_invariants(&self, buckets: &[BucketChain]) -> Result<(), InvariantError> {
        for k in 2..self.slots.len() {
            if self.size_at(k, buckets) > self.size_at(Self::parent(k), buckets) {
                return Err(InvariantError::new(format!(
                    "heap property violated at slot {k}: chain length {} exceeds parent's {}",
                    self.size_at(k, buckets),
                    self.size_at(Self::parent(k), buckets)
                )));
            }
        }
        for (k, &bucket) in self.slots.iter().enumerate().skip(1) {
            if self.position(bucket) != Some(k) {
                return Err(InvariantError::new(format!(
                    "bucket {bucket} stored at slot {k} but indexed at {:?}",
                    self.position(bucket)
                )));
            }
        }
        let indexed = self.positions.iter().filter(|p| p.is_some()).count();
        if indexed != self.len() {
            return Err(InvariantError::new(format!(
                "{indexed} buckets indexed but heap holds {}",
                self.len()
            )));
        }
        Ok(())
    }

    /// Chain length behind slot `k`; empty slots and buckets missing from
    /// `buckets` count as zero.
    #[inline]
    fn size_at(&self, k: usize, buckets: &[BucketChain]) -> usize {
        self.slots
            .get(k)
            .and_then(|&bucket| buckets.get(bucket))
            .map_or(0, BucketChain::len)
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
        self.positions[self.slots[a]] = Some(a);
        self.positions[self.slots[b]] = Some(b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chains(lengths: &[usize]) -> Vec<BucketChain> {
        lengths
            .iter()
            .enumerate()
            .map(|(bucket, &len)| {
                let mut chain = BucketChain::new();
                for i in 0..len {
                    chain.insert(&format!("b{bucket}w{i}"), 1);
                }
                chain
            })
            .collect()
    }

    #[test]
    fn index_arithmetic() {
        assert_eq!(BucketHeap::parent(1), 0);
        assert_eq!(BucketHeap::parent(5), 2);
        assert_eq!(BucketHeap::left(3), 6);
        assert_eq!(BucketHeap::right(3), 7);
    }

    #[test]
    fn empty_heap_reports_empty_collection() {
        let buckets = chains(&[1, 2]);
        let mut heap = BucketHeap::new(2);
        assert!(heap.is_empty());
        assert!(matches!(heap.get_max(&buckets), Err(TableError::EmptyCollection)));
        assert!(matches!(heap.remove_max(&buckets), Err(TableError::EmptyCollection)));
        assert_eq!(heap.peek_max(), None);
    }

    #[test]
    fn root_is_longest_chain() {
        let buckets = chains(&[1, 4, 2, 3]);
        let mut heap = BucketHeap::new(buckets.len());
        for bucket in 0..buckets.len() {
            heap.insert(bucket, &buckets).unwrap();
        }
        assert_eq!(heap.peek_max(), Some(1));
        assert_eq!(heap.get_max(&buckets).unwrap(), "b1w0");
        heap.check_invariants(&buckets).unwrap();
    }

    #[test]
    fn remove_max_yields_descending_lengths() {
        let buckets = chains(&[3, 1, 5, 2, 4]);
        let mut heap = BucketHeap::new(buckets.len());
        for bucket in 0..buckets.len() {
            heap.insert(bucket, &buckets).unwrap();
        }
        let mut order = Vec::new();
        while let Ok(bucket) = heap.remove_max(&buckets) {
            heap.check_invariants(&buckets).unwrap();
            order.push(buckets[bucket].len());
        }
        assert_eq!(order, [5, 4, 3, 2, 1]);
        assert!(!heap.contains(2));
    }

    #[test]
    fn reinsert_sifts_in_place_without_duplicating() {
        let mut buckets = chains(&[2, 1]);
        let mut heap = BucketHeap::new(2);
        heap.insert(0, &buckets).unwrap();
        heap.insert(1, &buckets).unwrap();
        assert_eq!(heap.peek_max(), Some(0));

        buckets[1].insert("extra1", 1);
        buckets[1].insert("extra2", 1);
        heap.insert(1, &buckets).unwrap();

        assert_eq!(heap.len(), 2);
        assert_eq!(heap.peek_max(), Some(1));
        assert_eq!(heap.position(1), Some(1));
        assert_eq!(heap.position(0), Some(2));
        heap.check_invariants(&buckets).unwrap();
    }

    #[test]
    fn ties_do_not_swap() {
        let buckets = chains(&[2, 2]);
        let mut heap = BucketHeap::new(2);
        heap.insert(0, &buckets).unwrap();
        heap.insert(1, &buckets).unwrap();
        assert_eq!(heap.peek_max(), Some(0));
    }

    #[test]
    fn repair_restores_heap_after_silent_growth() {
        let mut buckets = chains(&[1, 1, 1, 1]);
        let mut heap = BucketHeap::new(4);
        for bucket in 0..4 {
            heap.insert(bucket, &buckets).unwrap();
        }
        // Grow a leaf without notifying the heap.
        let leaf = heap.iter().last().unwrap();
        buckets[leaf].insert("grown1", 1);
        buckets[leaf].insert("grown2", 1);
        assert!(heap.check_invariants(&buckets).is_err());

        heap.repair(&buckets);
        heap.check_invariants(&buckets).unwrap();
        assert_eq!(heap.peek_max(), Some(leaf));
    }

    #[test]
    fn sort_consumes_in_descending_order() {
        let buckets = chains(&[2, 5, 1, 3]);
        let mut heap = BucketHeap::new(4);
        for bucket in 0..4 {
            heap.insert(bucket, &buckets).unwrap();
        }
        let sorted = heap.clone().sort(&buckets);
        assert_eq!(sorted, [1, 3, 0, 2]);
        // The clone was consumed; the original still answers queries.
        assert_eq!(heap.len(), 4);
    }

    #[test]
    fn render_limits_and_levels() {
        let buckets = chains(&[4, 3, 2, 1]);
        let mut heap = BucketHeap::new(4);
        for bucket in 0..4 {
            heap.insert(bucket, &buckets).unwrap();
        }
        assert_eq!(heap.render(&buckets, 3), "b0w0[4]\nb1w0[3]  b2w0[2]\n");
        assert_eq!(heap.render(&buckets, 0), "");
        assert_eq!(heap.render(&buckets, 99).lines().count(), 3);
    }

    #[test]
    fn insert_beyond_initial_bucket_count_grows_index() {
        let buckets = chains(&[1, 2, 3]);
        let mut heap = BucketHeap::new(0);
        for bucket in 0..3 {
            heap.insert(bucket, &buckets).unwrap();
        }
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.peek_max(), Some(2));
        assert!(!heap.contains(7));
        heap.check_invariants(&buckets).unwrap();
    }

    #[test]
    fn insert_out_of_range_bucket_is_rejected() {
        let buckets = chains(&[1, 2]);
        let mut heap = BucketHeap::new(2);
        heap.insert(0, &buckets).unwrap();

        let err = heap.insert(5, &buckets).unwrap_err();
        assert!(matches!(err, TableError::InvalidArgument { .. }));
        assert_eq!(heap.len(), 1);
        assert!(!heap.contains(5));

        heap.insert(1, &buckets).unwrap();
        assert_eq!(heap.peek_max(), Some(1));
        heap.check_invariants(&buckets).unwrap();
    }

    #[test]
    fn shorter_bucket_slice_reads_missing_chains_as_empty() {
        let buckets = chains(&[1, 3]);
        let mut heap = BucketHeap::new(2);
        heap.insert(0, &buckets).unwrap();
        heap.insert(1, &buckets).unwrap();

        let truncated = &buckets[..1];
        assert_eq!(heap.render(truncated, 15), "-[0]\nb0w0[1]\n");
        assert!(heap.check_invariants(truncated).is_err());
        assert_eq!(heap.remove_max(truncated).unwrap(), 1);
    }

    #[test]
    fn sifting_past_the_last_slot_is_a_no_op() {
        let buckets = chains(&[2, 1]);
        let mut heap = BucketHeap::new(2);
        heap.insert(0, &buckets).unwrap();
        heap.insert(1, &buckets).unwrap();
        heap.bubble_up(9, &buckets);
        heap.bubble_down(9, &buckets);
        assert_eq!(heap.iter().collect::<Vec<_>>(), [0, 1]);
        heap.check_invariants(&buckets).unwrap();
    }
}
