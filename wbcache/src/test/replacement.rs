use crate::cache::{CacheLine, CacheSet, CacheStore};
use crate::config::Geometry;
use crate::replacement_policies::{LeastRecentlyUsed, ReplacementPolicy, Victim};

fn four_way_store() -> CacheStore {
    CacheStore::new(&Geometry::new(64, 4, 16).unwrap())
}

#[test]
fn empty_set_fills_way_zero() {
    let store = four_way_store();
    assert_eq!(
        LeastRecentlyUsed.select_victim(store.set(0)),
        Victim { way: 0, was_occupied: false }
    );
}

#[test]
fn first_invalid_way_wins_over_old_lines() {
    let mut store = four_way_store();
    store.install(0, 0, 0xa, false);
    store.install(0, 2, 0xb, false);
    // Way 1 is still empty even though way 0 is the oldest valid line
    assert_eq!(
        LeastRecentlyUsed.select_victim(store.set(0)),
        Victim { way: 1, was_occupied: false }
    );
}

#[test]
fn full_set_evicts_smallest_recency() {
    let mut store = four_way_store();
    for (way, tag) in [(0, 0xa), (1, 0xb), (2, 0xc), (3, 0xd)] {
        store.install(0, way, tag, false);
    }
    store.touch(0, 0, false);
    store.touch(0, 2, false);
    // Way 1 was last touched before ways 3, 0 and 2
    assert_eq!(
        LeastRecentlyUsed.select_victim(store.set(0)),
        Victim { way: 1, was_occupied: true }
    );
    store.touch(0, 1, true);
    assert_eq!(LeastRecentlyUsed.select_victim(store.set(0)).way, 3);
}

#[test]
fn recency_ties_go_to_the_lowest_way() {
    // The store's clock never repeats a stamp, so the tie is built by hand
    let set = CacheSet::with_lines(vec![
        CacheLine::filled(0xa, false, 7),
        CacheLine::filled(0xb, false, 3),
        CacheLine::filled(0xc, true, 3),
        CacheLine::filled(0xd, false, 9),
    ]);
    assert_eq!(
        LeastRecentlyUsed.select_victim(&set),
        Victim { way: 1, was_occupied: true }
    );
}
