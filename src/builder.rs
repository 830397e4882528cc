//! Builder for configuring a [`WordTable`].
//!
//! ## Example
//!
//! ```rust
//! use wordtable::builder::TableBuilder;
//! use wordtable::hash::HashFunction;
//!
//! let mut table = TableBuilder::new(64)
//!     .hash_function(HashFunction::Djb2)
//!     .build()
//!     .unwrap();
//! table.insert("hello");
//! assert_eq!(table.find_freq("hello"), 1);
//! assert_eq!(table.hash_function(), HashFunction::Djb2);
//! ```

use crate::error::TableError;
use crate::hash::HashFunction;
use crate::table::{DEFAULT_CAPACITY, WordTable};

/// Configuration for a [`WordTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableBuilder {
    capacity: usize,
    hash_function: HashFunction,
}

impl TableBuilder {
    /// Starts a builder for a table with `capacity` buckets.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            hash_function: HashFunction::default(),
        }
    }

    /// Selects the hash function.
    pub fn hash_function(mut self, hash_function: HashFunction) -> Self {
        self.hash_function = hash_function;
        self
    }

    /// Builds the table.
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidArgument`] if the capacity is zero.
    pub fn build(self) -> Result<WordTable, TableError> {
        WordTable::with_hash_function(self.capacity, self.hash_function)
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
