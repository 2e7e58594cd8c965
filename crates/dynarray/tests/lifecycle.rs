//! Storage lifecycle: clone, move, destruction order and reallocation,
//! observed through `LifecycleTracker`.

use dynarray::{ArrayConfig, DynArray, GrowthPolicy};
use dynarray_test_utils::{tracked_points, LifecycleTracker, Vector2};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn filled(n: usize, tracker: &LifecycleTracker, growth: GrowthPolicy) -> DynArray<Vector2> {
    let mut arr = DynArray::with_config(ArrayConfig::new(0).with_growth(growth));
    for p in tracked_points(n, tracker) {
        arr.push_back(p);
    }
    arr
}

#[test]
fn push_back_moves_without_cloning() {
    init_tracing();
    let tracker = LifecycleTracker::new();
    let arr = filled(50, &tracker, GrowthPolicy::ByOne);
    assert_eq!(arr.len(), 50);
    assert_eq!(tracker.clones(), 0);
    assert_eq!(tracker.drops(), 0);
    for (i, p) in arr.iter().enumerate() {
        assert_eq!(*p, Vector2::new(i as f32, i as f32 + 1.0));
    }
}

#[test]
fn push_back_cloned_clones_once() {
    let tracker = LifecycleTracker::new();
    let original = Vector2::tracked(1.0, 1.0, &tracker);
    let mut arr = DynArray::new();
    arr.push_back_cloned(&original);
    assert_eq!(tracker.clones(), 1);
    assert_eq!(tracker.live(), 2);
}

#[test]
fn pop_back_destroys_exactly_one() {
    let tracker = LifecycleTracker::new();
    let mut arr = filled(3, &tracker, GrowthPolicy::Double);
    arr.pop_back();
    assert_eq!(arr.len(), 2);
    assert_eq!(tracker.drops(), 1);
    assert_eq!(tracker.dropped(), vec![(2.0, 3.0)]);
}

#[test]
fn clear_destroys_each_element_once_in_order() {
    let tracker = LifecycleTracker::new();
    let mut arr = filled(4, &tracker, GrowthPolicy::Double);
    let capacity = arr.capacity();
    arr.clear();
    assert_eq!(arr.len(), 0);
    assert_eq!(arr.capacity(), capacity);
    assert_eq!(
        tracker.dropped(),
        vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.0), (3.0, 4.0)]
    );
    drop(arr);
    assert_eq!(tracker.drops(), 4);
}

#[test]
fn drop_destroys_in_index_order() {
    let tracker = LifecycleTracker::new();
    drop(filled(3, &tracker, GrowthPolicy::ByOne));
    assert_eq!(tracker.dropped(), vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)]);
    assert_eq!(tracker.live(), 0);
}

#[test]
fn remove_at_preserves_order_and_destroys_one() {
    let tracker = LifecycleTracker::new();
    let mut arr = filled(5, &tracker, GrowthPolicy::Double);
    arr.remove_at(2);
    assert_eq!(tracker.dropped(), vec![(2.0, 3.0)]);
    let xs: Vec<f32> = arr.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![0.0, 1.0, 3.0, 4.0]);
    assert_eq!(tracker.clones(), 0);
}

#[test]
fn clone_is_independent() {
    let tracker = LifecycleTracker::new();
    let original = filled(3, &tracker, GrowthPolicy::Double);
    let mut copy = original.clone();
    assert_eq!(tracker.clones(), 3);
    assert_eq!(copy, original);

    copy[0].x = 99.0;
    copy.push_back(Vector2::new(0.0, 0.0));
    assert_eq!(original[0], Vector2::new(0.0, 1.0));
    assert_eq!(original.len(), 3);
}

#[test]
fn clearing_a_copy_leaves_original_untouched() {
    let tracker = LifecycleTracker::new();
    let original = filled(3, &tracker, GrowthPolicy::Double);
    let mut copy = original.clone();
    copy.clear();
    assert_eq!(tracker.drops(), 3);
    assert_eq!(original.len(), 3);
    assert_eq!(original[2], Vector2::new(2.0, 3.0));
}

#[test]
fn clone_from_destroys_old_elements_before_copying() {
    let tracker = LifecycleTracker::new();
    let source = filled(2, &tracker, GrowthPolicy::Double);
    let mut target: DynArray<Vector2> = DynArray::new();
    target.push_back(Vector2::tracked(-1.0, -1.0, &tracker));
    target.push_back(Vector2::tracked(-2.0, -2.0, &tracker));
    target.push_back(Vector2::tracked(-3.0, -3.0, &tracker));

    target.clone_from(&source);
    assert_eq!(
        tracker.dropped(),
        vec![(-1.0, -1.0), (-2.0, -2.0), (-3.0, -3.0)]
    );
    assert_eq!(target, source);
    assert_eq!(target.capacity(), source.capacity());
}

#[test]
fn take_transfers_ownership_and_empties_source() {
    let tracker = LifecycleTracker::new();
    let mut source = filled(3, &tracker, GrowthPolicy::Double);
    let moved = std::mem::take(&mut source);
    assert_eq!(source.len(), 0);
    assert_eq!(source.capacity(), 0);
    assert_eq!(moved.len(), 3);
    assert_eq!(tracker.clones(), 0);
    assert_eq!(tracker.drops(), 0);

    // The emptied source is reusable.
    source.push_back(Vector2::new(5.0, 5.0));
    assert_eq!(source.len(), 1);
}

#[test]
fn growth_never_clones_or_destroys() {
    init_tracing();
    let tracker = LifecycleTracker::new();
    let mut arr = filled(10, &tracker, GrowthPolicy::ByOne);
    arr.reserve_capacity(64);
    arr.shrink_to_fit();
    assert_eq!(arr.capacity(), 10);
    assert_eq!(tracker.clones(), 0);
    assert_eq!(tracker.drops(), 0);
}

#[test]
fn truncate_destroys_tail_in_order() {
    let tracker = LifecycleTracker::new();
    let mut arr = filled(4, &tracker, GrowthPolicy::Double);
    arr.truncate(2);
    assert_eq!(tracker.dropped(), vec![(2.0, 3.0), (3.0, 4.0)]);
    assert_eq!(arr.len(), 2);
}

#[test]
fn reserve_default_fills_new_slots() {
    let tracker = LifecycleTracker::new();
    let mut arr = filled(2, &tracker, GrowthPolicy::ByOne);
    arr.reserve(5);
    assert_eq!(arr.len(), 5);
    assert_eq!(arr[1], Vector2::new(1.0, 2.0));
    assert_eq!(arr[4], Vector2::default());
    assert_eq!(tracker.drops(), 0);
}

#[test]
fn owning_iterator_drops_leftovers() {
    let tracker = LifecycleTracker::new();
    let arr = filled(4, &tracker, GrowthPolicy::Double);
    let mut iter = arr.into_iter();
    let first = iter.next();
    drop(iter);
    assert_eq!(tracker.dropped(), vec![(1.0, 2.0), (2.0, 3.0), (3.0, 4.0)]);
    drop(first);
    assert_eq!(tracker.live(), 0);
}

#[test]
fn array_moves_across_threads() {
    let arr: DynArray<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
    let handle = std::thread::spawn(move || arr.len());
    assert_eq!(handle.join().unwrap(), 2);
}
