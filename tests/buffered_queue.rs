use std::sync::Arc;
use std::time::{Duration, Instant};

use duraq::{BufferedQueue, MemoryQueue, Queue, QueueError};

/// Polls until `predicate` holds or two seconds pass; the worker is
/// event-driven, so steady state arrives quickly but asynchronously.
fn wait_for(predicate: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);

    while Instant::now() < deadline {
        if predicate() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }

    predicate()
}

fn memory(items: impl IntoIterator<Item = u64>) -> Arc<MemoryQueue<u64>> {
    Arc::new(MemoryQueue::with_items(items))
}

#[test]
fn excess_over_ceiling_spills_to_overflow() {
    duraq::logging::init_logging();

    let buffer = memory([]);
    let overflow = memory([]);

    let queue = BufferedQueue::new(buffer.clone(), overflow.clone(), 5, 10, true)
        .expect("valid thresholds");

    assert!(queue.try_enqueue((0..12).collect()).is_ok());

    assert!(
        wait_for(|| buffer.count() == 10 && overflow.count() == 2),
        "buffer {} / overflow {} after worker settled",
        buffer.count(),
        overflow.count()
    );
    assert_eq!(queue.count(), 12);
}

#[test]
fn dequeue_below_floor_replenishes_from_overflow() {
    let buffer = memory([]);
    let overflow = memory(0..20);

    let queue = BufferedQueue::new(buffer.clone(), overflow.clone(), 5, 10, true)
        .expect("valid thresholds");

    // Replenishment is asynchronous: the first attempt sees an empty buffer
    // and only signals the worker to top it up.
    assert!(queue.try_dequeue(3).is_none());
    assert!(wait_for(|| buffer.count() == 5));

    let items = queue.try_dequeue(3).expect("buffer replenished");
    assert_eq!(items, vec![0, 1, 2]);
}

#[test]
fn stop_flushes_buffer_residue_to_overflow() {
    let buffer = memory([]);
    let overflow = memory([]);

    let queue = BufferedQueue::new(buffer.clone(), overflow.clone(), 5, 10, true)
        .expect("valid thresholds");

    assert!(queue.try_enqueue((0..100).collect()).is_ok());
    drop(queue);

    assert_eq!(overflow.count(), 100);
    assert_eq!(buffer.count(), 0);
}

#[test]
fn count_sums_buffer_and_overflow() {
    let buffer = memory(0..3);
    let overflow = memory(0..7);

    // Worker left unstarted so the split stays as constructed.
    let queue = BufferedQueue::new(buffer, overflow, 5, 10, false).expect("valid thresholds");

    assert_eq!(queue.count(), 10);
}

#[test]
fn start_is_idempotent() {
    let queue = BufferedQueue::new(memory([]), memory([]), 5, 10, false).expect("valid thresholds");

    queue.start();
    queue.start();

    assert!(queue.try_enqueue(vec![1]).is_ok());
    assert_eq!(queue.count(), 1);
}

#[test]
fn logging_init_is_repeatable() {
    duraq::logging::init_logging();
    duraq::logging::init_logging();
}

#[test]
fn stop_twice_is_a_no_op() {
    let queue = BufferedQueue::new(memory([]), memory([]), 5, 10, true).expect("valid thresholds");

    queue.stop();
    queue.stop();
}

#[test]
fn floor_at_or_above_ceiling_is_a_construction_fault() {
    let result = BufferedQueue::new(memory([]), memory([]), 10, 10, false);

    assert!(matches!(
        result,
        Err(QueueError::InvalidThresholds {
            floor: 10,
            ceiling: 10
        })
    ));
}

#[test]
fn aliased_buffer_and_overflow_is_a_construction_fault() {
    let queue = memory([]);

    let result = BufferedQueue::new(queue.clone(), queue, 5, 10, false);

    assert!(matches!(result, Err(QueueError::AliasedQueues)));
}

#[test]
fn buffer_within_thresholds_is_left_alone() {
    let buffer = memory([]);
    let overflow = memory([]);

    let queue = BufferedQueue::new(buffer.clone(), overflow.clone(), 5, 10, true)
        .expect("valid thresholds");

    assert!(queue.try_enqueue((0..8).collect()).is_ok());

    // Give the worker a moment; eight items sit between floor and ceiling.
    std::thread::sleep(Duration::from_millis(50));
    assert_eq!(buffer.count(), 8);
    assert_eq!(overflow.count(), 0);
}
