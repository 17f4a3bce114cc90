use std::sync::Arc;
use std::thread;

use pretty_assertions::assert_eq;

use crate::tools::assert_stalled;
use lockstep::Queue;

// -------------------------------------------------------------------------------------------------

#[test]
fn unbounded_never_blocks_append() {
    let queue = Queue::new();
    for i in 0..10_000 {
        queue.append(i);
    }
    assert_eq!(queue.pop(), 0);
    assert_eq!(queue.pop(), 1);
}

#[test]
fn limited_blocks_append_until_pop() {
    let queue = Arc::new(Queue::with_limit(2));
    queue.append("a");
    queue.append("b");
    let appender = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || queue.append("c"))
    };
    assert_stalled(&appender);

    assert_eq!(queue.pop(), "a");
    appender.join().unwrap();
    assert_eq!(queue.pop(), "b");
    assert_eq!(queue.pop(), "c");
}

#[test]
fn pop_waits_for_producer() {
    let queue = Arc::new(Queue::<u64>::with_limit(0));
    let consumer = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || (0..3).map(|_| queue.pop()).collect::<Vec<_>>())
    };
    assert_stalled(&consumer);

    for i in [7, 8, 9] {
        queue.append(i);
    }
    assert_eq!(consumer.join().unwrap(), vec![7, 8, 9]);
}
