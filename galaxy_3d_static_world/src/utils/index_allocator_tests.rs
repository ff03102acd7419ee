use super::*;

// ============================================================================
// Allocation and recycling
// ============================================================================

#[test]
fn test_sequential_alloc() {
    let mut indices = IndexAllocator::new();
    assert_eq!(indices.alloc(), Some(0));
    assert_eq!(indices.alloc(), Some(1));
    assert_eq!(indices.alloc(), Some(2));
    assert_eq!(indices.len(), 3);
}

#[test]
fn test_new_is_empty() {
    let indices = IndexAllocator::default();
    assert_eq!(indices.len(), 0);
    assert_eq!(indices.high_water_mark(), 0);
}

#[test]
fn test_recycles_most_recently_freed_first() {
    let mut indices = IndexAllocator::new();
    let a = indices.alloc().unwrap();
    let _b = indices.alloc().unwrap();
    let c = indices.alloc().unwrap();
    indices.free(a);
    indices.free(c);

    assert_eq!(indices.alloc(), Some(2));
    assert_eq!(indices.alloc(), Some(0));
    assert_eq!(indices.alloc(), Some(3));
    assert_eq!(indices.high_water_mark(), 4);
}

#[test]
fn test_live_indices_stay_unique() {
    let mut indices = IndexAllocator::new();
    let mut live = std::collections::HashSet::new();

    for _ in 0..40 {
        live.insert(indices.alloc().unwrap());
    }
    for index in (0..40).step_by(3) {
        indices.free(index);
        live.remove(&index);
    }
    for _ in 0..20 {
        let index = indices.alloc().unwrap();
        assert!(live.insert(index), "duplicate index: {}", index);
    }
    assert_eq!(indices.len(), live.len());
}

// ============================================================================
// Wire-exact limit
// ============================================================================

#[test]
fn test_max_wire_index_is_exact_as_f32() {
    assert_eq!(MAX_WIRE_INDEX as f32 as i32, MAX_WIRE_INDEX);
    assert_eq!((MAX_WIRE_INDEX - 1) as f32 as i32, MAX_WIRE_INDEX - 1);
    // One past the limit no longer survives the round trip
    assert_ne!((MAX_WIRE_INDEX + 1) as f32 as i32, MAX_WIRE_INDEX + 1);
}

#[test]
fn test_exhaustion_returns_none_and_recycling_still_works() {
    let mut indices = IndexAllocator::new();
    // Skip ahead instead of allocating 16 million indices
    indices.next_index = MAX_WIRE_INDEX;

    assert_eq!(indices.alloc(), Some(MAX_WIRE_INDEX));
    assert_eq!(indices.alloc(), None);
    assert_eq!(indices.len(), 1);

    indices.free(MAX_WIRE_INDEX);
    assert_eq!(indices.alloc(), Some(MAX_WIRE_INDEX));
}
