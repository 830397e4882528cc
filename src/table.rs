//! Fixed-capacity chained hash table of word frequencies.
//!
//! [`WordTable`] owns an array of [`BucketChain`]s and a [`BucketHeap`] that
//! ranks those buckets by chain length. Capacity is set at construction and
//! never changes; there is no rehashing.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │  WordTable { capacity: 4, hash_function: Djb2 }                          │
//! │                                                                          │
//! │   word ──► hash_function.bucket(word, 4) ──► index                       │
//! │                                                                          │
//! │   buckets (owned):                    heap (indices only):               │
//! │     [0] ──► ["fox",1]                   slot 1 ──► bucket 2 (len 2)      │
//! │     [1] ──► (empty)                     slot 2 ──► bucket 0 (len 1)      │
//! │     [2] ──► ["the",2] ──► ["quick",2]   slot 3 ──► bucket 3 (len 1)      │
//! │     [3] ──► ["brown",1]                                                  │
//! │                                                                          │
//! │   collisions: 1   unique_words: 4   total_words: 6                       │
//! └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Insert Flow
//!
//! ```text
//!   insert(word):
//!     1. index = hash_code(word)
//!     2. word in buckets[index]?  → frequency += 1 (chain length unchanged)
//!        otherwise                → append with frequency 1, unique_words += 1
//!                                   bucket was non-empty → collisions += 1
//!                                   heap.insert(index)  (adds or sifts up)
//!     3. total_words += 1
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use wordtable::hash::HashFunction;
//! use wordtable::table::WordTable;
//!
//! let mut table = WordTable::with_hash_function(4, HashFunction::Djb2).unwrap();
//! for word in ["the", "quick", "brown", "fox", "the", "quick"] {
//!     table.insert(word);
//! }
//!
//! assert_eq!(table.unique_words(), 4);
//! assert_eq!(table.total_words(), 6);
//! assert_eq!(table.find_freq("the"), 2);
//! assert_eq!(table.find_freq("missing"), 0);
//! ```
//!
//! ## Longest Chain vs. Most Frequent Word
//!
//! [`find_max`](WordTable::find_max) returns the *head word of the longest
//! chain*, which is the bucket that absorbed the most collisions. It is not
//! the most frequent word. Use [`top_words`](WordTable::top_words) for that.
//!
//! ## Thread Safety
//!
//! `WordTable` has no internal locking. Callers sharing a table across
//! threads must serialize every operation.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info, trace, warn};

use crate::ds::bucket_heap::BucketHeap;
use crate::ds::chain::BucketChain;
use crate::error::{InvariantError, TableError};
use crate::hash::HashFunction;
use crate::ingest;
use crate::stats::TableStats;

/// Bucket count used when none is configured.
pub const DEFAULT_CAPACITY: usize = 1009;

/// Chained hash table counting word occurrences.
#[derive(Debug)]
pub struct WordTable {
    buckets: Vec<BucketChain>,
    heap: BucketHeap,
    hash_function: HashFunction,
    collisions: u64,
    unique_words: u64,
    total_words: u64,
}

impl WordTable {
    /// Creates a table with `capacity` buckets and the default hash function.
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidArgument`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, TableError> {
        Self::with_hash_function(capacity, HashFunction::default())
    }

    /// Creates a table with `capacity` buckets hashed by `hash_function`.
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidArgument`] if `capacity` is zero.
    pub fn with_hash_function(
        capacity: usize,
        hash_function: HashFunction,
    ) -> Result<Self, TableError> {
        if capacity == 0 {
            return Err(TableError::invalid_argument("capacity must be > 0"));
        }
        Ok(Self {
            buckets: (0..capacity).map(|_| BucketChain::new()).collect(),
            heap: BucketHeap::new(capacity),
            hash_function,
            collisions: 0,
            unique_words: 0,
            total_words: 0,
        })
    }

    /// Returns the fixed bucket count.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub fn hash_function(&self) -> HashFunction {
        self.hash_function
    }

    #[inline]
    pub fn collisions(&self) -> u64 {
        self.collisions
    }

    #[inline]
    pub fn unique_words(&self) -> u64 {
        self.unique_words
    }

    #[inline]
    pub fn total_words(&self) -> u64 {
        self.total_words
    }

    /// Returns the bucket index of `word`, always in `[0, capacity)`.
    #[inline]
    pub fn hash_code(&self, word: &str) -> usize {
        self.hash_function.bucket(word, self.capacity())
    }

    /// Records one occurrence of `word`.
    ///
    /// Returns `true` if `word` was not in the table before. Empty words are
    /// ignored and leave every counter unchanged.
    pub fn insert(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        let index = self.hash_code(word);
        let bucket = &mut self.buckets[index];

        let is_new = if let Some(entry) = bucket.find_mut(word) {
            entry.increment();
            false
        } else {
            let was_empty = bucket.is_empty();
            bucket.insert(word, 1);
            self.unique_words += 1;
            if !was_empty {
                self.collisions += 1;
                trace!(word, bucket = index, chain_len = bucket.len(), "collision");
            }
            if let Err(err) = self.heap.insert(index, &self.buckets) {
                warn!(bucket = index, %err, "heap rejected bucket");
            }
            true
        };

        self.total_words += 1;
        is_new
    }

    /// Returns how often `word` was inserted; 0 for empty or unknown words.
    pub fn find_freq(&self, word: &str) -> u64 {
        if word.is_empty() {
            debug!("find_freq called with an empty word");
            return 0;
        }
        self.buckets[self.hash_code(word)]
            .find(word)
            .map_or(0, |entry| entry.frequency())
    }

    /// Imports every word of the text file at `path`.
    ///
    /// # Errors
    ///
    /// [`TableError::Io`] if the file cannot be opened or read. A file that
    /// cannot be opened leaves the table untouched.
    pub fn import(&mut self, path: impl AsRef<Path>) -> Result<TableStats, TableError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "importing");
        let file = File::open(path)?;
        self.import_reader(BufReader::new(file))
    }

    /// Imports every word read from `reader`, line by line.
    ///
    /// Invalid UTF-8 is decoded lossily. After the last line a corrective
    /// heap pass runs and the final counters are returned.
    pub fn import_reader<R: BufRead>(&mut self, mut reader: R) -> Result<TableStats, TableError> {
        let mut line = Vec::new();
        let mut lines = 0u64;
        loop {
            line.clear();
            let read = reader
                .read_until(b'\n', &mut line)
                .inspect_err(|err| warn!(line = lines + 1, %err, "import read failed"))?;
            if read == 0 {
                break;
            }
            lines += 1;
            let text = String::from_utf8_lossy(&line);
            for word in ingest::words(&text) {
                self.insert(&word);
            }
        }

        debug!(heap_len = self.heap.len(), "repairing bucket heap");
        self.heap.repair(&self.buckets);

        let stats = self.stats();
        info!(
            lines,
            collisions = stats.collisions,
            unique_words = stats.unique_words,
            total_words = stats.total_words,
            "import complete"
        );
        Ok(stats)
    }

    /// Returns the head word of the longest chain.
    ///
    /// # Errors
    ///
    /// [`TableError::EmptyCollection`] if no word has been inserted.
    pub fn find_max(&self) -> Result<&str, TableError> {
        self.heap.get_max(&self.buckets)
    }

    /// Returns the chain at `index`, if in range.
    #[inline]
    pub fn bucket(&self, index: usize) -> Option<&BucketChain> {
        self.buckets.get(index)
    }

    #[inline]
    pub fn buckets(&self) -> &[BucketChain] {
        &self.buckets
    }

    #[inline]
    pub fn heap(&self) -> &BucketHeap {
        &self.heap
    }

    /// Non-empty bucket indices by descending chain length.
    ///
    /// Sorts a copy of the heap; the table keeps accepting inserts afterward.
    pub fn ranked_buckets(&self) -> Vec<usize> {
        self.heap.clone().sort(&self.buckets)
    }

    /// The `n` most frequent words, highest first, ties by key.
    pub fn top_words(&self, n: usize) -> Vec<(&str, u64)> {
        let mut words: Vec<(&str, u64)> = self
            .buckets
            .iter()
            .flat_map(BucketChain::iter)
            .map(|entry| (entry.key(), entry.frequency()))
            .collect();
        words.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        words.truncate(n);
        words
    }

    /// Level-by-level dump of the first `limit` heap slots.
    pub fn render_heap(&self, limit: usize) -> String {
        self.heap.render(&self.buckets, limit)
    }

    pub fn stats(&self) -> TableStats {
        TableStats {
            hash_function: self.hash_function,
            collisions: self.collisions,
            unique_words: self.unique_words,
            total_words: self.total_words,
            capacity: self.capacity(),
            non_empty_buckets: self.buckets.iter().filter(|b| !b.is_empty()).count(),
            longest_chain: self.buckets.iter().map(BucketChain::len).max().unwrap_or(0),
        }
    }

    /// Validates counter, chain, and heap invariants.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let chained: usize = self.buckets.iter().map(BucketChain::len).sum();
        if chained as u64 != self.unique_words {
            return Err(InvariantError::new(format!(
                "unique_words is {} but chains hold {chained} entries",
                self.unique_words
            )));
        }
        if self.total_words < self.unique_words {
            return Err(InvariantError::new(format!(
                "total_words {} is below unique_words {}",
                self.total_words, self.unique_words
            )));
        }

        let non_empty = self.buckets.iter().filter(|b| !b.is_empty()).count();
        if self.collisions != self.unique_words - non_empty as u64 {
            return Err(InvariantError::new(format!(
                "collisions is {} but {} words share {non_empty} buckets",
                self.collisions, self.unique_words
            )));
        }

        self.heap.check_invariants(&self.buckets)?;
        if self.heap.len() != non_empty {
            return Err(InvariantError::new(format!(
                "heap holds {} buckets but {non_empty} are non-empty",
                self.heap.len()
            )));
        }
        if let Some(bucket) = (0..self.capacity())
            .find(|&i| self.buckets[i].is_empty() == self.heap.contains(i))
        {
            return Err(InvariantError::new(format!(
                "bucket {bucket} heap membership does not match its emptiness"
            )));
        }
        Ok(())
    }
}
