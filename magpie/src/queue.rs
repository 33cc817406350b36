//! The foundational synchronization primitive: an unbounded blocking FIFO.
//!
//! One mutex guards the buffer; one condition variable signals "not empty".
//! Every push wakes ALL waiters (`notify_all`, not `notify_one`): a plain
//! popper and a most-recent popper may be blocked on the same queue at once,
//! and only each waiter's own predicate re-check decides who actually
//! consumes.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// An unbounded FIFO safe for any number of concurrent producers and
/// consumers.
///
/// Blocking and timed pops suspend the calling thread; everything else
/// returns promptly. Besides plain FIFO consumption, the queue offers a
/// coalescing mode ([`pop_most_recent`](Self::pop_most_recent)) that trades
/// completeness for freshness: it returns the newest element and throws away
/// the backlog.
pub struct BlockingQueue<T> {
    items: Mutex<VecDeque<T>>,
    not_empty: Condvar,
}

impl<T> BlockingQueue<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            not_empty: Condvar::new(),
        }
    }

    // No queue operation panics while holding the lock, so a poisoned
    // guard still protects a consistent buffer and can be recovered.
    fn locked(&self) -> MutexGuard<'_, VecDeque<T>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends `value` at the tail and wakes all waiting consumers.
    pub fn push(&self, value: T) {
        let mut items = self.locked();
        items.push_back(value);
        self.not_empty.notify_all();
    }

    /// Blocks until the queue is non-empty, then removes and returns the
    /// head. Sequential pops observe values in push order.
    pub fn pop(&self) -> T {
        let mut items = self.locked();
        loop {
            if let Some(value) = items.pop_front() {
                return value;
            }
            items = self
                .not_empty
                .wait(items)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Blocks until the queue is non-empty, then returns the tail (the
    /// newest element) and discards the entire remaining contents.
    pub fn pop_most_recent(&self) -> T {
        let mut items = self.locked();
        loop {
            if let Some(value) = items.pop_back() {
                items.clear();
                return value;
            }
            items = self
                .not_empty
                .wait(items)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Like [`pop`](Self::pop), but gives up once `timeout` has elapsed.
    ///
    /// Returns `None` on timeout. The wait is re-armed against an absolute
    /// deadline, so spurious wakeups never extend it.
    pub fn timed_pop(&self, timeout: Duration) -> Option<T> {
        let deadline = Instant::now() + timeout;
        let mut items = self.locked();
        loop {
            if let Some(value) = items.pop_front() {
                return Some(value);
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return None;
            }
            let (guard, _) = self
                .not_empty
                .wait_timeout(items, remaining)
                .unwrap_or_else(PoisonError::into_inner);
            items = guard;
        }
    }

    /// Like [`pop_most_recent`](Self::pop_most_recent), but gives up once
    /// `timeout` has elapsed. Returns `None` on timeout.
    pub fn timed_pop_most_recent(&self, timeout: Duration) -> Option<T> {
        let deadline = Instant::now() + timeout;
        let mut items = self.locked();
        loop {
            if let Some(value) = items.pop_back() {
                items.clear();
                return Some(value);
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return None;
            }
            let (guard, _) = self
                .not_empty
                .wait_timeout(items, remaining)
                .unwrap_or_else(PoisonError::into_inner);
            items = guard;
        }
    }

    /// Atomically empties the queue.
    ///
    /// Does not signal the wake condition: no element ever reaches a
    /// consumer as a result of `clear`, so blocked pops keep waiting for a
    /// genuinely new push.
    pub fn clear(&self) {
        self.locked().clear();
    }

    /// Snapshot of the current element count. Advisory only: it may be
    /// stale the instant after it returns under concurrent modification.
    pub fn len(&self) -> usize {
        self.locked().len()
    }

    /// Snapshot emptiness query. Advisory only, like [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.locked().is_empty()
    }
}

impl<T> Default for BlockingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for BlockingQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockingQueue")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn pop_preserves_push_order() {
        let queue = BlockingQueue::new();
        for i in 0..100 {
            queue.push(i);
        }
        for i in 0..100 {
            assert_eq!(queue.pop(), i);
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn pop_most_recent_returns_tail_and_discards_backlog() {
        let queue = BlockingQueue::new();
        queue.push(1);
        queue.push(2);
        queue.push(3);

        assert_eq!(queue.pop_most_recent(), 3);
        assert_eq!(queue.len(), 0);

        // Nothing left: a timed pop must come back empty-handed.
        assert_eq!(queue.timed_pop(Duration::from_millis(20)), None);
    }

    #[test]
    fn pop_most_recent_with_single_element() {
        let queue = BlockingQueue::new();
        queue.push(42);
        assert_eq!(queue.pop_most_recent(), 42);
        assert!(queue.is_empty());
    }

    #[test]
    fn timed_pop_times_out_on_an_empty_queue() {
        let queue: BlockingQueue<u32> = BlockingQueue::new();
        let timeout = Duration::from_millis(100);

        let started = Instant::now();
        assert_eq!(queue.timed_pop(timeout), None);
        assert!(started.elapsed() >= timeout);

        let started = Instant::now();
        assert_eq!(queue.timed_pop_most_recent(timeout), None);
        assert!(started.elapsed() >= timeout);
    }

    #[test]
    fn timed_pop_sees_a_concurrent_push() {
        let queue = Arc::new(BlockingQueue::new());

        let producer = {
            let queue = queue.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(50));
                queue.push(7);
            })
        };

        assert_eq!(queue.timed_pop(Duration::from_secs(5)), Some(7));
        producer.join().unwrap();
    }

    #[test]
    fn clear_empties_the_queue() {
        let queue = BlockingQueue::new();
        queue.push(1);
        queue.push(2);
        queue.clear();
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.timed_pop(Duration::from_millis(20)), None);
    }

    #[test]
    fn clear_does_not_wake_a_blocked_pop() {
        let queue = Arc::new(BlockingQueue::new());
        let returned = Arc::new(AtomicBool::new(false));

        let consumer = {
            let queue = queue.clone();
            let returned = returned.clone();
            thread::spawn(move || {
                let value = queue.pop();
                returned.store(true, Ordering::SeqCst);
                value
            })
        };

        // Let the consumer reach its wait, then clear. It must keep waiting.
        thread::sleep(Duration::from_millis(100));
        queue.clear();
        thread::sleep(Duration::from_millis(100));
        assert!(!returned.load(Ordering::SeqCst));

        // A genuine push releases it.
        queue.push(99);
        assert_eq!(consumer.join().unwrap(), 99);
        assert!(returned.load(Ordering::SeqCst));
    }

    #[test]
    fn one_push_wakes_both_pop_styles_but_only_one_consumes() {
        let queue = Arc::new(BlockingQueue::new());
        let hits = Arc::new(AtomicUsize::new(0));

        let plain = {
            let queue = queue.clone();
            let hits = hits.clone();
            thread::spawn(move || {
                if queue.timed_pop(Duration::from_secs(2)).is_some() {
                    hits.fetch_add(1, Ordering::SeqCst);
                }
            })
        };
        let coalescing = {
            let queue = queue.clone();
            let hits = hits.clone();
            thread::spawn(move || {
                if queue
                    .timed_pop_most_recent(Duration::from_secs(2))
                    .is_some()
                {
                    hits.fetch_add(1, Ordering::SeqCst);
                }
            })
        };

        thread::sleep(Duration::from_millis(100));
        queue.push(1);

        plain.join().unwrap();
        coalescing.join().unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn every_value_is_consumed_exactly_once_under_contention() {
        const PRODUCERS: usize = 4;
        const CONSUMERS: usize = 4;
        const PER_PRODUCER: usize = 250;

        let queue = Arc::new(BlockingQueue::new());

        let producers: Vec<_> = (0..PRODUCERS)
            .map(|p| {
                let queue = queue.clone();
                thread::spawn(move || {
                    for i in 0..PER_PRODUCER {
                        queue.push(p * PER_PRODUCER + i);
                    }
                })
            })
            .collect();

        let consumers: Vec<_> = (0..CONSUMERS)
            .map(|_| {
                let queue = queue.clone();
                thread::spawn(move || {
                    let mut seen = Vec::with_capacity(PER_PRODUCER);
                    for _ in 0..PER_PRODUCER {
                        seen.push(queue.pop());
                    }
                    seen
                })
            })
            .collect();

        for producer in producers {
            producer.join().unwrap();
        }

        let mut all: Vec<usize> = consumers
            .into_iter()
            .flat_map(|c| c.join().unwrap())
            .collect();
        all.sort_unstable();
        let expected: Vec<usize> = (0..PRODUCERS * PER_PRODUCER).collect();
        assert_eq!(all, expected);
        assert!(queue.is_empty());
    }
}
