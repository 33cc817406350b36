//! Concrete mailboxes over the delivery capability interfaces.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use magpie_api::mailbox::{MessageInput, MessageOutput};
use magpie_api::types::SharedMessage;

use crate::queue::BlockingQueue;

/// Shared handle to a [`MessageQueue`], as returned by
/// [`MessageMulticaster::create_output`](crate::multicast::MessageMulticaster::create_output).
pub type SharedMessageQueue = Arc<MessageQueue>;

/// A message mailbox: one owned [`BlockingQueue`] exposed through both
/// capability interfaces.
///
/// Hand the same instance to a producer as a [`MessageOutput`] and to a
/// consumer as a [`MessageInput`]; each side sees only the contract it
/// needs. All delivery guarantees are the underlying queue's.
pub struct MessageQueue {
    queue: BlockingQueue<SharedMessage>,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self {
            queue: BlockingQueue::new(),
        }
    }

    /// Atomically discards all buffered messages. Blocked consumers keep
    /// waiting; nothing is delivered as a result of a clear.
    pub fn clear(&self) {
        self.queue.clear();
    }

    /// Snapshot of the number of buffered messages. Advisory only.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Snapshot emptiness query. Advisory only.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Default for MessageQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MessageQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageQueue")
            .field("len", &self.len())
            .finish()
    }
}

impl MessageInput for MessageQueue {
    fn pop(&self) -> SharedMessage {
        self.queue.pop()
    }

    fn pop_most_recent(&self) -> SharedMessage {
        self.queue.pop_most_recent()
    }

    fn timed_pop(&self, timeout: Duration) -> Option<SharedMessage> {
        self.queue.timed_pop(timeout)
    }

    fn timed_pop_most_recent(&self, timeout: Duration) -> Option<SharedMessage> {
        self.queue.timed_pop_most_recent(timeout)
    }
}

impl MessageOutput for MessageQueue {
    fn push(&self, message: SharedMessage) {
        self.queue.push(message);
    }
}

/// A no-op sink: every pushed message is discarded.
///
/// Useful as a default or disabled output so call sites push
/// unconditionally instead of branching on "is anyone listening".
#[derive(Debug, Default, Clone, Copy)]
pub struct NullMessageOutput;

impl NullMessageOutput {
    pub fn new() -> Self {
        Self
    }
}

impl MessageOutput for NullMessageOutput {
    fn push(&self, _message: SharedMessage) {}
}
