#![cfg(test)]

use std::collections::HashSet;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::*;
use crate::collections::fifo::FifoBuffer;
use crate::collections::heap::PriorityBuffer;
use crate::collections::stack::StackBuffer;
use crate::collections::traits::BufferCursor;
use crate::util::error::{BufferError, BufferOverflow, BufferUnderflow, OverflowKind, WaitInterrupted};

const SHORT: Duration = Duration::from_millis(50);
const SLACK: Duration = Duration::from_secs(2);

fn spawn<S, F, R>(buffer: &S, f: F) -> JoinHandle<R>
where
    S: Clone + Send + 'static,
    F: FnOnce(S) -> R + Send + 'static,
    R: Send + 'static,
{
    let buffer = buffer.clone();
    thread::spawn(move || f(buffer))
}

/// Interrupts the buffer until the thread finishes, since an interrupt only affects threads that
/// are already waiting.
fn interrupt_until_done<S: SharedBuffer, R>(buffer: &S, handle: JoinHandle<R>) -> R {
    while !handle.is_finished() {
        buffer.interrupt();
        thread::sleep(Duration::from_millis(5));
    }
    handle.join().unwrap()
}

#[test]
fn test_synchronized_never_waits() {
    let buffer = SynchronizedBuffer::new(PriorityBuffer::<u32>::new());

    let start = Instant::now();
    assert_eq!(buffer.remove_timeout(Duration::from_secs(10)), Err::<u32, _>(BufferUnderflow.into()));
    assert_eq!(buffer.get::<u32>(), Err(BufferError::Underflow(BufferUnderflow)));
    assert!(start.elapsed() < SLACK, "A synchronized buffer shouldn't wait.");

    buffer.add_all([3, 1, 2]).unwrap();
    assert_eq!(buffer.get(), Ok(1));
    assert_eq!(buffer.len(), 3, "Get shouldn't remove the element.");
    assert_eq!(buffer.remove(), Ok(1));
    buffer.clear();
    assert!(buffer.is_empty());
}

#[test]
fn test_synchronized_concurrent_adds() {
    let buffer = SynchronizedBuffer::new(StackBuffer::new());

    let workers: Vec<_> = (0..8_u32)
        .map(|worker| {
            spawn(&buffer, move |buffer| {
                for i in 0..100 {
                    buffer.add(worker * 100 + i).unwrap();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let inner = buffer.try_into_inner().unwrap();
    let seen: HashSet<u32> = inner.into_iter().collect();
    assert_eq!(seen.len(), 800, "No add should be lost.");
}

#[test]
fn test_try_into_inner_with_handles() {
    let buffer = SynchronizedBuffer::new(FifoBuffer::<u8>::new());
    let other = buffer.clone();

    let buffer = buffer.try_into_inner().unwrap_err();
    drop(other);
    assert!(buffer.try_into_inner().is_ok());
}

#[test]
fn test_blocking_remove_wakes_on_add() {
    let buffer = BlockingBuffer::decorate(FifoBuffer::new());
    let consumer = spawn(&buffer, |buffer| {
        let start = Instant::now();
        (buffer.remove(), start.elapsed())
    });

    thread::sleep(SHORT);
    buffer.add("ready").unwrap();

    let (removed, waited) = consumer.join().unwrap();
    assert_eq!(removed, Ok("ready"));
    assert!(waited < SHORT + SLACK, "The consumer should wake promptly after an add.");
    assert!(buffer.is_empty());
}

#[test]
fn test_blocking_get_leaves_element() {
    let buffer = BlockingBuffer::decorate(PriorityBuffer::new());
    let reader = spawn(&buffer, |buffer| buffer.get());

    thread::sleep(SHORT);
    buffer.add(String::from("peek")).unwrap();

    assert_eq!(reader.join().unwrap(), Ok(String::from("peek")));
    assert_eq!(buffer.len(), 1);
}

#[test]
fn test_blocking_timeout() {
    let buffer = BlockingBuffer::decorate(FifoBuffer::<u8>::new());
    let timeout = Duration::from_millis(100);

    let start = Instant::now();
    assert_eq!(
        buffer.remove_timeout(timeout),
        Err(BufferError::Underflow(BufferUnderflow))
    );
    let waited = start.elapsed();
    assert!(waited >= timeout, "The wait shouldn't end before the timeout.");
    assert!(waited < timeout + SLACK);

    let start = Instant::now();
    assert!(buffer.get_timeout(Duration::ZERO).unwrap_err().is_underflow());
    assert!(start.elapsed() < SLACK);
}

#[test]
fn test_blocking_configured_timeout() {
    let timeout = Duration::from_millis(80);
    let buffer = BlockingBuffer::with_timeout(SynchronizedBuffer::new(FifoBuffer::<u8>::new()), timeout);
    assert_eq!(buffer.timeout(), Some(timeout));

    let start = Instant::now();
    assert!(buffer.remove().unwrap_err().is_underflow());
    assert!(start.elapsed() >= timeout);

    let consumer = spawn(&buffer, |buffer| buffer.remove_timeout(SLACK * 5));
    thread::sleep(timeout * 2);
    buffer.add(9).unwrap();
    assert_eq!(
        consumer.join().unwrap(),
        Ok(9),
        "An explicit timeout should replace the configured one."
    );
}

#[test]
fn test_blocking_no_lost_wakeups() {
    let buffer = BlockingBuffer::decorate(FifoBuffer::new());
    let consumers: Vec<_> = (0..4)
        .map(|_| spawn(&buffer, |buffer| buffer.remove()))
        .collect();

    thread::sleep(SHORT);
    buffer.add_all([1_u8, 2, 3, 4]).unwrap();

    let taken: HashSet<u8> = consumers
        .into_iter()
        .map(|consumer| consumer.join().unwrap().unwrap())
        .collect();
    assert_eq!(taken, HashSet::from([1, 2, 3, 4]), "Each consumer should take exactly one element.");
    assert!(buffer.is_empty());
}

#[test]
fn test_blocking_interrupt() {
    let buffer = BlockingBuffer::decorate(StackBuffer::<u8>::new());
    let consumer = spawn(&buffer, |buffer| buffer.remove());

    assert_eq!(
        interrupt_until_done(&buffer, consumer),
        Err(BufferError::Interrupted(WaitInterrupted)),
        "An interrupted wait should be distinguishable from a timeout."
    );

    buffer.add(1).unwrap();
    assert_eq!(buffer.remove(), Ok(1), "Later calls shouldn't be affected by an interrupt.");
}

#[test]
fn test_bounded_invalid_size() {
    let err = BoundedBuffer::decorate(FifoBuffer::<u8>::new(), 0).unwrap_err();
    assert_eq!(err.message, "the maximum size of a BoundedBuffer must be greater than 0");
    assert!(BoundedBuffer::with_wait(SynchronizedBuffer::new(StackBuffer::<u8>::new()), 0, WaitPolicy::Forever).is_err());
}

#[test]
fn test_bounded_fails_when_full() {
    let buffer = BoundedBuffer::decorate(FifoBuffer::new(), 1).unwrap();
    assert!(buffer.wait_policy().is_never());

    buffer.add("x").unwrap();
    assert!(buffer.is_full());
    assert_eq!(
        buffer.add("y"),
        Err(BufferError::Overflow(BufferOverflow {
            max_size: 1,
            kind: OverflowKind::Full,
        }))
    );
    assert_eq!(buffer.remove(), Ok("x"));
    buffer.add("y").unwrap();
    assert_eq!(buffer.len(), 1);
}

#[test]
fn test_bounded_capacity() {
    let buffer = BoundedBuffer::decorate(PriorityBuffer::new(), 3).unwrap();

    buffer.add_all([5, 4, 3]).unwrap();
    assert_eq!(buffer.remaining_capacity(), 0);
    assert!(buffer.add(2).unwrap_err().is_overflow());
    assert_eq!(buffer.len(), 3);

    assert_eq!(buffer.remove(), Ok(3));
    assert_eq!(buffer.remaining_capacity(), 1);
    assert!(buffer.add_all([2, 1]).is_err(), "A batch should only be added if all of it fits.");
    assert_eq!(buffer.len(), 2);
    buffer.add(1).unwrap();
    assert!(buffer.add(0).is_err());
}

#[test]
fn test_bounded_batch_too_large() {
    let buffer = BoundedBuffer::with_wait(
        SynchronizedBuffer::new(FifoBuffer::new()),
        2,
        WaitPolicy::Forever,
    )
    .unwrap();

    let start = Instant::now();
    let err = buffer.add_all([1, 2, 3]).unwrap_err();
    assert!(start.elapsed() < SLACK, "A batch that can never fit shouldn't wait.");
    assert_eq!(
        err,
        BufferError::Overflow(BufferOverflow {
            max_size: 2,
            kind: OverflowKind::TooLarge,
        })
    );
    assert!(buffer.is_empty());
}

#[test]
fn test_bounded_timeout() {
    let timeout = Duration::from_millis(100);
    let buffer = BoundedBuffer::with_timeout(
        SynchronizedBuffer::new(FifoBuffer::new()),
        1,
        timeout,
    )
    .unwrap();
    buffer.add(1).unwrap();

    let start = Instant::now();
    let err = buffer.add(2).unwrap_err();
    let waited = start.elapsed();
    assert_eq!(
        err,
        BufferError::Overflow(BufferOverflow {
            max_size: 1,
            kind: OverflowKind::TimedOut,
        })
    );
    assert!(waited >= timeout);
    assert!(waited < timeout + SLACK);

    let zero = BoundedBuffer::with_timeout(buffer.inner().clone(), 1, Duration::ZERO).unwrap();
    assert_eq!(
        zero.add(2),
        Err(BufferError::Overflow(BufferOverflow {
            max_size: 1,
            kind: OverflowKind::TimedOut,
        })),
        "A zero timeout should still report a timeout rather than a full buffer."
    );
}

#[test]
fn test_bounded_producer_wakes_on_remove() {
    let buffer = BoundedBuffer::with_wait(
        SynchronizedBuffer::new(FifoBuffer::new()),
        2,
        WaitPolicy::Timeout(SLACK * 5),
    )
    .unwrap();
    buffer.add_all(["a", "b"]).unwrap();

    let producer = spawn(&buffer, |buffer| buffer.add("c"));
    thread::sleep(SHORT);
    assert_eq!(buffer.len(), 2, "The producer should be waiting for space.");

    assert_eq!(buffer.remove(), Ok("a"));
    producer.join().unwrap().unwrap();
    assert_eq!(buffer.remove(), Ok("b"));
    assert_eq!(buffer.remove(), Ok("c"));
}

#[test]
fn test_bounded_clear_wakes_producer() {
    let buffer = BoundedBuffer::with_wait(
        SynchronizedBuffer::new(StackBuffer::new()),
        1,
        WaitPolicy::Forever,
    )
    .unwrap();
    buffer.add(1).unwrap();

    let producer = spawn(&buffer, |buffer| buffer.add(2));
    thread::sleep(SHORT);
    buffer.clear();

    producer.join().unwrap().unwrap();
    assert_eq!(buffer.remove(), Ok(2));
}

#[test]
fn test_bounded_interrupt() {
    let buffer = BoundedBuffer::with_wait(
        SynchronizedBuffer::new(FifoBuffer::new()),
        1,
        WaitPolicy::Forever,
    )
    .unwrap();
    buffer.add('a').unwrap();

    let producer = spawn(&buffer, |buffer| buffer.add('b'));
    assert_eq!(
        interrupt_until_done(&buffer, producer),
        Err(BufferError::Interrupted(WaitInterrupted))
    );
    assert_eq!(buffer.len(), 1);
}

#[test]
fn test_stacked_layers_share_lock() {
    let synchronized = SynchronizedBuffer::new(PriorityBuffer::new());
    let blocking = BlockingBuffer::new(synchronized.clone());
    let queue = BoundedBuffer::with_wait(blocking, 2, WaitPolicy::Forever).unwrap();

    assert!(std::ptr::eq(queue.buffer_lock(), synchronized.buffer_lock()));

    let consumer = spawn(&queue, |queue| queue.remove());
    thread::sleep(SHORT);
    queue.inner().add_all([8, 3]).unwrap();
    assert_eq!(consumer.join().unwrap(), Ok(3), "The consumer should wait in the blocking layer.");

    queue.add(1).unwrap();
    let producer = spawn(&queue, |queue| queue.add(5));
    thread::sleep(SHORT);
    assert_eq!(queue.remove(), Ok(1));
    producer.join().unwrap().unwrap();

    let mut remaining = Vec::new();
    while let Ok(value) = queue.remove_timeout(Duration::ZERO) {
        remaining.push(value);
    }
    assert_eq!(remaining, [5, 8]);
}

#[test]
fn test_blocking_over_bounded() {
    let queue = BlockingBuffer::new(
        BoundedBuffer::with_wait(SynchronizedBuffer::new(FifoBuffer::new()), 1, WaitPolicy::Forever).unwrap(),
    );

    let producer = spawn(&queue, |queue| {
        for i in 0..10_u32 {
            queue.add(i).unwrap();
        }
    });

    let consumed: Vec<u32> = (0..10).map(|_| queue.remove().unwrap()).collect();
    producer.join().unwrap();
    assert_eq!(consumed, (0..10).collect::<Vec<_>>());
}

#[test]
fn test_guard_wakes_waiters() {
    let buffer = BoundedBuffer::with_wait(
        SynchronizedBuffer::new(FifoBuffer::new()),
        3,
        WaitPolicy::Forever,
    )
    .unwrap();
    buffer.add_all([1_u8, 2, 3]).unwrap();

    let producer = spawn(&buffer, |buffer| buffer.add(4));
    thread::sleep(SHORT);

    {
        let mut guard = buffer.lock();
        assert_eq!(guard.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);

        let mut cursor = guard.cursor();
        while let Some(value) = cursor.next() {
            if *value == 2 {
                cursor.remove().unwrap();
            }
        }
    }

    producer.join().unwrap().unwrap();
    assert_eq!(
        buffer.lock().iter().copied().collect::<Vec<_>>(),
        [1, 3, 4]
    );
}
