use core::cmp::Ordering as KeyOrdering;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use super::super::cursor::Cursor;
use super::super::prelude::*;
use super::super::StringSet;

/// Park on the gap for `value` until it is present.
///
/// `parked` is bumped once, while the gap's lock is still held, right before
/// the first wait. Once a caller sees the count and then takes the same lock,
/// the waiter is sitting on the condition variable. `wakeups` counts every
/// return from a wait.
fn park_for(set: &StringSet, value: &str, parked: &AtomicUsize, wakeups: &AtomicUsize) {
    let mut cursor = Cursor::new(set.head_node());
    let mut announced = false;
    while cursor.seek(value) != KeyOrdering::Equal {
        if !announced {
            parked.fetch_add(1, Ordering::SeqCst);
            announced = true;
        }
        cursor.park();
        wakeups.fetch_add(1, Ordering::SeqCst);
    }
}

fn wait_until_parked(parked: &AtomicUsize, expected: usize) {
    while parked.load(Ordering::SeqCst) < expected {
        thread::yield_now();
    }
}

#[test]
fn test_splice_broadcasts_to_every_parked_waiter() {
    let waiters = 6;
    let set = StringSet::new();
    let parked = AtomicUsize::new(0);
    let wakeups = AtomicUsize::new(0);

    thread::scope(|s| {
        for _ in 0..waiters {
            s.spawn(|| park_for(&set, "m", &parked, &wakeups));
        }
        wait_until_parked(&parked, waiters);

        // Every waiter parks on the head, the predecessor of the gap
        let mut cursor = Cursor::new(set.head_node());
        assert_eq!(cursor.seek("m"), KeyOrdering::Greater);
        assert_eq!(cursor.splice(Arc::from("m")), waiters);
    });

    assert_eq!(wakeups.load(Ordering::SeqCst), waiters);
}

#[test]
fn test_splice_without_waiters_wakes_nobody() {
    let set = StringSet::new();
    let mut cursor = Cursor::new(set.head_node());
    assert_eq!(cursor.seek("q"), KeyOrdering::Greater);
    assert_eq!(cursor.splice(Arc::from("q")), 0);
}

#[test]
fn test_duplicate_insert_does_not_signal() {
    let set: StringSet = ["a", "z"].into_iter().collect();
    let parked = AtomicUsize::new(0);
    let wakeups = AtomicUsize::new(0);

    thread::scope(|s| {
        s.spawn(|| park_for(&set, "m", &parked, &wakeups));
        wait_until_parked(&parked, 1);

        // The duplicate check for "z" stops on "a", the node the waiter
        // is parked on
        assert!(!set.insert("z"));
        assert!(!set.insert("a"));
        thread::sleep(Duration::from_millis(50));
        assert_eq!(wakeups.load(Ordering::SeqCst), 0);

        assert!(set.insert("m"));
    });

    assert_eq!(wakeups.load(Ordering::SeqCst), 1);
}
