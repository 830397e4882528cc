pub mod bucket_heap;
pub mod chain;

pub use bucket_heap::BucketHeap;
pub use chain::{BucketChain, Entry, Iter};
