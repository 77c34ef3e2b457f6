use super::*;

#[test]
fn allocates_lowest_index_first() {
    let mut p = SlotPool::new("durations", 3);
    assert_eq!(p.allocate(1.0), Ok(SlotIndex(0)));
    assert_eq!(p.allocate(2.0), Ok(SlotIndex(1)));
    assert_eq!(p.allocate(3.0), Ok(SlotIndex(2)));
    assert!(p.is_full());
}

#[test]
fn freed_slot_is_reused_next() {
    let mut p = SlotPool::new("delays", 4);
    for v in 0..4 {
        p.allocate(v).unwrap();
    }
    assert_eq!(p.free(SlotIndex(2)), Some(2));
    assert_eq!(p.free(SlotIndex(1)), Some(1));
    assert_eq!(p.len(), 2);

    assert_eq!(p.allocate(10), Ok(SlotIndex(1)));
    assert_eq!(p.allocate(11), Ok(SlotIndex(2)));
    assert_eq!(p.get(SlotIndex(1)), Some(&10));
}

#[test]
fn full_pool_rejects_and_keeps_count() {
    let mut p = SlotPool::new("modes", 1);
    p.allocate("a").unwrap();
    assert_eq!(p.allocate("b"), Err("b"));
    assert_eq!(p.len(), 1);

    let err = p.try_allocate("c").unwrap_err();
    assert!(matches!(
        err,
        CanvasAnimError::PoolExhausted {
            pool: "modes",
            capacity: 1
        }
    ));
    assert_eq!(p.len(), 1);
}

#[test]
fn zero_capacity_is_always_full() {
    let mut p = SlotPool::<u8>::new("empty", 0);
    assert!(p.is_full());
    assert!(p.is_empty());
    assert_eq!(p.allocate(1), Err(1));
}

#[test]
fn free_is_idempotent_and_bounds_checked() {
    let mut p = SlotPool::new("x", 2);
    let i = p.allocate(5u8).unwrap();
    assert_eq!(p.free(i), Some(5));
    assert_eq!(p.free(i), None);
    assert_eq!(p.free(SlotIndex(99)), None);
    assert_eq!(p.len(), 0);
    assert!(!p.is_occupied(SlotIndex(99)));
}

#[test]
fn iter_and_clear() {
    let mut p = SlotPool::new("x", 4);
    p.allocate('a').unwrap();
    let b = p.allocate('b').unwrap();
    p.allocate('c').unwrap();
    p.free(b);

    let seen: Vec<_> = p.iter().map(|(i, v)| (i.0, *v)).collect();
    assert_eq!(seen, vec![(0, 'a'), (2, 'c')]);

    p.clear();
    assert!(p.is_empty());
    assert_eq!(p.iter().count(), 0);
    assert_eq!(p.capacity(), 4);
}

#[test]
fn expect_slot_reports_pool_name() {
    let p = SlotPool::<f64>::new("start_times", 2);
    let err = p.expect_slot(SlotIndex(1)).unwrap_err();
    assert!(err.to_string().contains("start_times slot 1"));
}
