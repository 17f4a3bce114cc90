use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::thread;

use pretty_assertions::assert_eq;

use crate::tools::{assert_stalled, init_logging, subscriber};
use lockstep::SafeMap;

// -------------------------------------------------------------------------------------------------

#[test]
fn inserted_keys_are_found() {
    init_logging();
    let map = Arc::new(SafeMap::new());
    let keys = ["alpha", "beta", "gamma", "delta"];
    let observer = subscriber(map.alert(), keys.len());

    for (i, key) in keys.into_iter().enumerate() {
        map.insert(key, i);
    }

    assert_eq!(
        observer.join().unwrap(),
        vec![("alpha", 0), ("beta", 1), ("gamma", 2), ("delta", 3)]
    );
    for (i, key) in keys.into_iter().enumerate() {
        assert_eq!(map.get(&key), Some(i));
        assert_eq!(map.has(&key), true);
    }
    assert_eq!(map.get(&"epsilon"), None);
    assert_eq!(map.has(&"epsilon"), false);
}

#[test]
fn delete_twice() {
    let map = Arc::new(SafeMap::new());
    let observer = subscriber(map.alert(), 2);
    map.insert(1, 'a').insert(2, 'b');
    observer.join().unwrap();

    map.delete(&1);
    assert_eq!(map.has(&1), false);
    map.delete(&1);
    assert_eq!(map.has(&1), false);
    map.delete(&99);
    assert_eq!(map.snapshot(), BTreeMap::from([(2, 'b')]));
}

#[test]
fn clear_then_len() {
    let map = Arc::new(SafeMap::new());
    let observer = subscriber(map.alert(), 10);
    for i in 0..10 {
        map.insert(i, i * i);
    }
    observer.join().unwrap();

    assert_eq!(map.len(), 10);
    map.clear();
    assert_eq!(map.len(), 0);
    assert!(map.is_empty());
}

/// Each inserting thread's alert is received exactly once, and every entry is stored.
#[test]
fn concurrent_inserts_are_each_alerted_once() {
    const N: u32 = 32;
    let map = Arc::new(SafeMap::new());

    let inserters: Vec<_> = (0..N)
        .map(|i| {
            let map = Arc::clone(&map);
            thread::spawn(move || {
                map.insert(i, format!("value {i}"));
            })
        })
        .collect();

    let alerts = map.alert();
    let received: Vec<(u32, String)> = (0..N).map(|_| alerts.recv().unwrap()).collect();
    for handle in inserters {
        handle.join().unwrap();
    }

    for (key, value) in &received {
        assert_eq!(*value, format!("value {key}"));
    }
    let keys: BTreeSet<u32> = received.iter().map(|&(key, _)| key).collect();
    assert_eq!(keys, (0..N).collect::<BTreeSet<_>>());
    assert_eq!(map.len(), N as usize);
    assert_eq!(map.snapshot(), received.into_iter().collect::<BTreeMap<_, _>>());
}

/// Alerts arrive in the order the insertions were applied to the table.
#[test]
fn alerts_follow_commit_order() {
    let map = Arc::new(SafeMap::new());
    let writer = {
        let map = Arc::clone(&map);
        thread::spawn(move || {
            for i in 0..50 {
                map.insert("counter", i);
            }
        })
    };

    let alerts = map.alert();
    for expected in 0..50 {
        let (_, value) = alerts.recv().unwrap();
        assert_eq!(value, expected);
    }
    writer.join().unwrap();
    assert_eq!(map.get(&"counter"), Some(49));
}

#[test]
fn insert_without_subscriber_stays_blocked() {
    let map = Arc::new(SafeMap::new());
    let inserter = {
        let map = Arc::clone(&map);
        thread::spawn(move || {
            map.insert("k", 1);
        })
    };
    assert_stalled(&inserter);

    // Readers are held up by the write lock too.
    let reader = {
        let map = Arc::clone(&map);
        thread::spawn(move || map.len())
    };
    assert_stalled(&reader);

    assert_eq!(map.alert().recv(), Ok(("k", 1)));
    inserter.join().unwrap();
    assert_eq!(reader.join().unwrap(), 1);
}
