//! wordtable: a chained word-frequency hash table with selectable hash
//! functions and a max-heap that ranks buckets by chain length.
//!
//! See `DESIGN.md` for the module map and design decisions.

pub mod builder;
pub mod ds;
pub mod error;
pub mod hash;
pub mod ingest;
pub mod prelude;
pub mod shell;
pub mod stats;
pub mod table;

pub use crate::builder::TableBuilder;
pub use crate::ds::{BucketChain, BucketHeap, Entry};
pub use crate::error::{InvariantError, TableError};
pub use crate::hash::HashFunction;
pub use crate::stats::TableStats;
pub use crate::table::{DEFAULT_CAPACITY, WordTable};
