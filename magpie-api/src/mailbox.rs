//! Delivery capability interfaces.
//!
//! Receiving and sending are separate contracts so a component can advertise
//! only the capability it needs: a producer is handed a [`MessageOutput`]
//! and cannot drain the queue; a consumer is handed a [`MessageInput`] and
//! cannot inject messages upstream.

use std::time::Duration;

use crate::types::SharedMessage;

/// Receive capability of a message queue.
///
/// The blocking pops suspend the calling thread until a message is
/// available; the timed variants bound the wait and report "no value" as
/// `None`. The `most_recent` variants coalesce: they return the newest
/// buffered message and discard the rest of the backlog, for consumers that
/// only care about the latest state. Both styles consume from the same
/// underlying store, so they should not be mixed on one queue when older
/// messages must never be dropped.
pub trait MessageInput: Send + Sync {
    /// Blocks until a message is available, then returns the oldest one.
    fn pop(&self) -> SharedMessage;

    /// Blocks until a message is available, then returns the newest one and
    /// discards everything else that was buffered.
    fn pop_most_recent(&self) -> SharedMessage;

    /// Like [`pop`](Self::pop), but gives up after `timeout`.
    fn timed_pop(&self, timeout: Duration) -> Option<SharedMessage>;

    /// Like [`pop_most_recent`](Self::pop_most_recent), but gives up after
    /// `timeout`.
    fn timed_pop_most_recent(&self, timeout: Duration) -> Option<SharedMessage>;
}

/// Send capability of a message queue.
pub trait MessageOutput: Send + Sync {
    /// Delivers a message. Never blocks; buffering is unbounded.
    fn push(&self, message: SharedMessage);
}
