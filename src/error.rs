//! Error types for the wordtable library.
//!
//! ## Key Components
//!
//! - [`TableError`]: Returned by fallible table, heap, and hash-selection
//!   operations (empty heap, bad argument, unreadable import source).
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (`check_invariants` methods).
//!
//! ## Example Usage
//!
//! ```
//! use wordtable::error::TableError;
//! use wordtable::table::WordTable;
//!
//! let table = WordTable::new(16).unwrap();
//! assert!(matches!(table.find_max(), Err(TableError::EmptyCollection)));
//!
//! // Zero capacity is caught without panicking
//! assert!(matches!(WordTable::new(0), Err(TableError::InvalidArgument { .. })));
//! ```

use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// TableError
// ---------------------------------------------------------------------------

/// Errors reported by the word table, its bucket heap, and hash selection.
///
/// All variants are local and recoverable; none of them leaves the table in
/// an inconsistent state.
#[derive(Debug, Error)]
pub enum TableError {
    /// The bucket heap was queried or extracted while empty.
    #[error("heap is empty")]
    EmptyCollection,

    /// A parameter was out of range (unknown hash function, zero capacity).
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the rejected parameter.
        message: String,
    },

    /// The import source could not be opened or read.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl TableError {
    /// Creates an [`InvalidArgument`](Self::InvalidArgument) error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal table invariants are violated.
///
/// Produced by [`WordTable::check_invariants`](crate::table::WordTable::check_invariants).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
