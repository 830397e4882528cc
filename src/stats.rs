//! Point-in-time counters for a [`WordTable`](crate::table::WordTable).

use std::fmt;

use crate::hash::HashFunction;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TableStats {
    pub hash_function: HashFunction,
    pub collisions: u64,
    pub unique_words: u64,
    pub total_words: u64,

    // gauges captured at snapshot time
    pub capacity: usize,
    pub non_empty_buckets: usize,
    pub longest_chain: usize,
}

impl TableStats {
    /// Distinct words per bucket.
    pub fn load_factor(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.unique_words as f64 / self.capacity as f64
    }

    /// Fraction of buckets holding at least one word.
    pub fn occupancy(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.non_empty_buckets as f64 / self.capacity as f64
    }
}

impl fmt::Display for TableStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "The number of collisions is: {}", self.collisions)?;
        writeln!(f, "The number of unique words is: {}", self.unique_words)?;
        writeln!(f, "The total number of words is: {}", self.total_words)?;
        write!(
            f,
            "hash={} capacity={} buckets_used={} longest_chain={} \
             load_factor={:.3} occupancy={:.3}",
            self.hash_function,
            self.capacity,
            self.non_empty_buckets,
            self.longest_chain,
            self.load_factor(),
            self.occupancy()
        )
    }
}
