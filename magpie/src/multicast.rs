//! Fan-out delivery: one push replicated to many independent outputs.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::trace;

use magpie_api::mailbox::MessageOutput;
use magpie_api::types::{SharedMessage, SharedMessageOutput};

use crate::error::MulticastError;
use crate::mailbox::{MessageQueue, SharedMessageQueue};

/// Replicates every pushed message to all registered outputs, in
/// registration order. Each output buffers independently, so one producer
/// can feed many consumers without coupling them.
///
/// # Usage pattern
///
/// Registration is NOT synchronized against delivery. Complete all
/// [`add_output`](Self::add_output) / [`create_output`](Self::create_output)
/// calls before any consumer thread starts and before the first concurrent
/// `push`. The registration methods take `&mut self`, so the natural
/// build-then-share-behind-`Arc` flow upholds this; debug builds
/// additionally assert that no registration happens after broadcasting has
/// begun.
///
/// Delivery is fail-fast: `push` itself cannot fail, but a custom output
/// that panics unwinds immediately and outputs registered after it are not
/// reached on that call.
///
/// # Examples
///
/// ```rust
/// use magpie::MessageMulticaster;
/// use magpie_api::{MessageInput, MessageOutput, TextMessage};
///
/// let mut caster = MessageMulticaster::new();
/// let first = caster.create_output();
/// let second = caster.create_output();
///
/// caster.push(TextMessage::create("tick"));
/// assert_eq!(first.pop().describe(), "tick");
/// assert_eq!(second.pop().describe(), "tick");
/// ```
pub struct MessageMulticaster {
    outputs: Vec<SharedMessageOutput>,
    broadcast_started: AtomicBool,
}

impl MessageMulticaster {
    pub fn new() -> Self {
        Self {
            outputs: Vec::new(),
            broadcast_started: AtomicBool::new(false),
        }
    }

    /// Registers a fan-out destination.
    ///
    /// Accepts a present handle directly or an `Option` from a fallible
    /// lookup; an absent output is rejected with
    /// [`MulticastError::InvalidOutput`] and the registration list is left
    /// unchanged.
    pub fn add_output<O>(&mut self, output: O) -> Result<(), MulticastError>
    where
        O: Into<Option<SharedMessageOutput>>,
    {
        let output = output.into().ok_or(MulticastError::InvalidOutput)?;
        self.register(output);
        Ok(())
    }

    /// Constructs a fresh [`MessageQueue`], registers it, and returns it
    /// for independent consumption.
    pub fn create_output(&mut self) -> SharedMessageQueue {
        let queue = Arc::new(MessageQueue::new());
        self.register(queue.clone());
        queue
    }

    /// Removes all registered outputs.
    pub fn clear_outputs(&mut self) {
        self.outputs.clear();
    }

    /// Number of currently registered outputs.
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    fn register(&mut self, output: SharedMessageOutput) {
        debug_assert!(
            !self.broadcast_started.load(Ordering::Relaxed),
            "multicaster outputs must be registered before the first push"
        );
        self.outputs.push(output);
    }
}

impl Default for MessageMulticaster {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MessageMulticaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageMulticaster")
            .field("outputs", &self.outputs.len())
            .finish()
    }
}

impl MessageOutput for MessageMulticaster {
    fn push(&self, message: SharedMessage) {
        self.broadcast_started.store(true, Ordering::Relaxed);
        trace!(
            outputs = self.outputs.len(),
            payload = %message.describe(),
            "fanning out message"
        );
        for output in &self.outputs {
            output.push(message.clone());
        }
    }
}
