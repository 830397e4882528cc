//! Common imports.
//!
//! ```
//! use wordtable::prelude::*;
//!
//! let mut table: WordTable = TableBuilder::new(8)
//!     .hash_function(HashFunction::CrcLike)
//!     .build()
//!     .unwrap();
//! table.insert("word");
//! let stats: TableStats = table.stats();
//! assert_eq!(stats.total_words, 1);
//! ```

pub use crate::builder::TableBuilder;
pub use crate::error::{InvariantError, TableError};
pub use crate::hash::HashFunction;
pub use crate::stats::TableStats;
pub use crate::table::WordTable;
