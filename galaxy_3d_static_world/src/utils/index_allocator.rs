/// Allocates and recycles model indices for the visibility wire format.
///
/// Indices travel to the GPU as `f32`, so they are capped at
/// `MAX_WIRE_INDEX`: every integer up to 2^24 is exact as a float.
/// Freed indices are recycled, most recently freed first.
///
/// # Example
///
/// ```ignore
/// let mut indices = IndexAllocator::new();
/// let a = indices.alloc().unwrap();  // 0
/// let b = indices.alloc().unwrap();  // 1
/// indices.free(a);                    // 0 is now available
/// let c = indices.alloc().unwrap();  // 0 (recycled)
/// ```
pub struct IndexAllocator {
    free_list: Vec<i32>,
    next_index: i32,
    len: usize,
}

/// Largest index that survives the round trip through `f32`
pub const MAX_WIRE_INDEX: i32 = 1 << 24;

impl IndexAllocator {
    pub fn new() -> Self {
        Self {
            free_list: Vec::new(),
            next_index: 0,
            len: 0,
        }
    }

    /// Next available index, or `None` once every wire-exact index is taken
    pub fn alloc(&mut self) -> Option<i32> {
        let index = match self.free_list.pop() {
            Some(index) => index,
            None if self.next_index <= MAX_WIRE_INDEX => {
                let index = self.next_index;
                self.next_index += 1;
                index
            }
            None => return None,
        };
        self.len += 1;
        Some(index)
    }

    /// Return an index to the pool
    pub fn free(&mut self, index: i32) {
        debug_assert!((0..self.next_index).contains(&index), "freeing an unallocated index: {}", index);
        debug_assert!(!self.free_list.contains(&index), "double free of index {}", index);
        self.len -= 1;
        self.free_list.push(index);
    }

    /// Highest index ever handed out + 1
    pub fn high_water_mark(&self) -> i32 {
        self.next_index
    }

    /// Number of indices currently in use
    pub fn len(&self) -> usize {
        self.len
    }
}

impl Default for IndexAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "index_allocator_tests.rs"]
mod tests;
