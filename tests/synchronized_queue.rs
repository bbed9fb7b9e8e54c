use std::sync::Arc;

use duraq::{synchronize, MemoryQueue, Queue, SynchronizedQueue};

#[test]
fn wrapping_reports_synchronized() {
    let queue = SynchronizedQueue::new(Arc::new(MemoryQueue::<u32>::new()));

    assert!(queue.is_synchronized());
}

#[test]
fn synchronize_wraps_unsynchronized_queues() {
    let queue: Arc<dyn Queue<u32>> = Arc::new(MemoryQueue::new());

    let wrapped = synchronize(queue);
    assert!(wrapped.is_synchronized());
}

#[test]
fn synchronize_returns_synchronized_queues_unchanged() {
    let queue: Arc<dyn Queue<u32>> =
        Arc::new(SynchronizedQueue::new(Arc::new(MemoryQueue::new())));

    let same = synchronize(queue.clone());
    assert!(Arc::ptr_eq(&queue, &same));
}

#[test]
fn forwards_contract_operations() {
    let queue = SynchronizedQueue::new(Arc::new(MemoryQueue::new()));

    assert!(queue.try_enqueue(vec![1, 2, 3]).is_ok());
    assert_eq!(queue.count(), 3);
    assert_eq!(queue.try_dequeue(2), Some(vec![1, 2]));

    assert!(queue.try_enqueue(Vec::new()).is_err());
    assert!(queue.try_dequeue(0).is_none());
}

#[test]
fn concurrent_callers_see_every_item() {
    let queue = Arc::new(SynchronizedQueue::new(Arc::new(MemoryQueue::new())));

    let producers: Vec<_> = (0..4u64)
        .map(|worker| {
            let queue = Arc::clone(&queue);
            std::thread::spawn(move || {
                for i in 0..100 {
                    assert!(queue.try_enqueue(vec![worker * 100 + i]).is_ok());
                }
            })
        })
        .collect();

    for handle in producers {
        handle.join().expect("producer panicked");
    }

    assert_eq!(queue.count(), 400);

    let mut drained = 0;
    while let Some(items) = queue.try_dequeue(64) {
        drained += items.len();
    }
    assert_eq!(drained, 400);
}
