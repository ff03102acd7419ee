//! Internal utilities

mod index_allocator;

pub use index_allocator::{IndexAllocator, MAX_WIRE_INDEX};
