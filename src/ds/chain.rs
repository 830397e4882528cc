//! Singly linked bucket chain of `(word, frequency)` entries.
//!
//! Each table slot owns one [`BucketChain`]. Entries are appended at the tail
//! on first insertion and never reordered or removed individually, so the head
//! entry is always the first word that hashed into the bucket.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  BucketChain { head, len: 3 }                                    │
//! │                                                                  │
//! │   head ──► ["the", 4] ──► ["fox", 1] ──► ["cat", 2] ──► None     │
//! │            (first seen)                   (last seen)            │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation  | Description                            | Complexity |
//! |------------|----------------------------------------|------------|
//! | `insert`   | Overwrite value or append at the tail  | O(len)     |
//! | `find`     | Exact-key lookup                       | O(len)     |
//! | `find_mut` | Exact-key lookup, mutable              | O(len)     |
//! | `first`    | Head entry                             | O(1)       |
//! | `clear`    | Drop all entries                       | O(len)     |
//!
//! ## Example Usage
//!
//! ```
//! use wordtable::ds::BucketChain;
//!
//! let mut chain = BucketChain::new();
//! assert!(chain.insert("apple", 1));
//! assert!(chain.insert("pear", 1));
//! assert!(!chain.insert("apple", 5)); // existing key: value overwritten
//!
//! assert_eq!(chain.len(), 2);
//! assert_eq!(chain.find("apple").map(|e| e.frequency()), Some(5));
//! assert_eq!(chain.first().map(|e| e.key()), Some("apple"));
//! ```
//!
//! ## Thread Safety
//!
//! `BucketChain` is not thread-safe; the owning table serializes access.

use std::fmt;

/// A single `(key, frequency)` node in a [`BucketChain`].
pub struct Entry {
    key: String,
    frequency: u64,
    next: Option<Box<Entry>>,
}

impl Entry {
    fn new(key: &str, frequency: u64) -> Self {
        Self {
            key: key.to_owned(),
            frequency,
            next: None,
        }
    }

    /// Returns the stored word.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the stored frequency.
    #[inline]
    pub fn frequency(&self) -> u64 {
        self.frequency
    }

    /// Overwrites the stored frequency.
    #[inline]
    pub fn set_frequency(&mut self, frequency: u64) {
        self.frequency = frequency;
    }

    /// Adds one to the stored frequency and returns the new value.
    #[inline]
    pub fn increment(&mut self) -> u64 {
        self.frequency = self.frequency.saturating_add(1);
        self.frequency
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("key", &self.key)
            .field("frequency", &self.frequency)
            .finish()
    }
}

/// Unsorted singly linked list of unique keys.
///
/// # Example
///
/// ```
/// use wordtable::ds::BucketChain;
///
/// let mut chain = BucketChain::new();
/// chain.insert("a", 1);
/// chain.insert("b", 1);
///
/// let keys: Vec<&str> = chain.iter().map(|e| e.key()).collect();
/// assert_eq!(keys, ["a", "b"]);
///
/// chain.clear();
/// assert!(chain.is_empty());
/// ```
#[derive(Default)]
pub struct BucketChain {
    head: Option<Box<Entry>>,
    len: usize,
}

impl BucketChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the chain holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts `key` with `value`, or overwrites the value of an existing key.
    ///
    /// Returns `true` if a new entry was appended.
    pub fn insert(&mut self, key: &str, value: u64) -> bool {
        if let Some(entry) = self.find_mut(key) {
            entry.set_frequency(value);
            return false;
        }

        let mut cursor = &mut self.head;
        while let Some(entry) = cursor {
            cursor = &mut entry.next;
        }
        *cursor = Some(Box::new(Entry::new(key, value)));
        self.len += 1;
        true
    }

    /// Returns the entry for `key`, if present.
    pub fn find(&self, key: &str) -> Option<&Entry> {
        self.iter().find(|entry| entry.key == key)
    }

    /// Returns a mutable reference to the entry for `key`, if present.
    pub fn find_mut(&mut self, key: &str) -> Option<&mut Entry> {
        let mut cursor = self.head.as_deref_mut();
        while let Some(entry) = cursor {
            if entry.key == key {
                return Some(entry);
            }
            cursor = entry.next.as_deref_mut();
        }
        None
    }

    /// Returns the head entry (the first key inserted into this chain).
    #[inline]
    pub fn first(&self) -> Option<&Entry> {
        self.head.as_deref()
    }

    /// Iterates entries from head to tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// Drops every entry and resets the chain to empty.
    pub fn clear(&mut self) {
        let mut next = self.head.take();
        while let Some(mut entry) = next {
            next = entry.next.take();
        }
        self.len = 0;
    }
}

// Unlinks iteratively; the derived recursive drop can overflow the stack on
// pathological chains (capacity 1, large corpus).
impl Drop for BucketChain {
    fn drop(&mut self) {
        self.clear();
    }
}

impl fmt::Debug for BucketChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Borrowing iterator over a [`BucketChain`].
pub struct Iter<'a> {
    next: Option<&'a Entry>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.next?;
        self.next = entry.next.as_deref();
        Some(entry)
    }
}

impl<'a> IntoIterator for &'a BucketChain {
    type Item = &'a Entry;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_starts_empty() {
        let chain = BucketChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
        assert!(chain.first().is_none());
        assert!(chain.find("x").is_none());
    }

    #[test]
    fn chain_appends_in_first_seen_order() {
        let mut chain = BucketChain::new();
        chain.insert("c", 1);
        chain.insert("a", 1);
        chain.insert("b", 1);
        let keys: Vec<&str> = chain.iter().map(Entry::key).collect();
        assert_eq!(keys, ["c", "a", "b"]);
        assert_eq!(chain.first().map(Entry::key), Some("c"));
    }

    #[test]
    fn chain_insert_existing_overwrites_without_growing() {
        let mut chain = BucketChain::new();
        assert!(chain.insert("k", 1));
        assert!(!chain.insert("k", 7));
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.find("k").map(Entry::frequency), Some(7));
    }

    #[test]
    fn chain_find_mut_increments_in_place() {
        let mut chain = BucketChain::new();
        chain.insert("a", 1);
        chain.insert("b", 1);
        let entry = chain.find_mut("b").unwrap();
        assert_eq!(entry.increment(), 2);
        assert_eq!(chain.find("b").map(Entry::frequency), Some(2));
        assert_eq!(chain.find("a").map(Entry::frequency), Some(1));
    }

    #[test]
    fn chain_find_is_exact_match() {
        let mut chain = BucketChain::new();
        chain.insert("word", 1);
        assert!(chain.find("Word").is_none());
        assert!(chain.find("wor").is_none());
        assert!(chain.find("words").is_none());
    }

    #[test]
    fn chain_clear_resets() {
        let mut chain = BucketChain::new();
        chain.insert("a", 1);
        chain.insert("b", 2);
        chain.clear();
        assert!(chain.is_empty());
        assert!(chain.find("a").is_none());
        assert!(chain.insert("a", 3));
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn chain_long_drop_does_not_overflow() {
        let mut chain = BucketChain::new();
        // Push at head directly; tail appends would make the test quadratic.
        for i in 0..200_000 {
            let mut entry = Box::new(Entry::new(&i.to_string(), 1));
            entry.next = chain.head.take();
            chain.head = Some(entry);
            chain.len += 1;
        }
        assert_eq!(chain.len(), 200_000);
        drop(chain);
    }

    #[test]
    fn chain_debug_lists_entries() {
        let mut chain = BucketChain::new();
        chain.insert("x", 3);
        let dbg = format!("{chain:?}");
        assert!(dbg.contains("\"x\""));
        assert!(dbg.contains('3'));
    }
}
