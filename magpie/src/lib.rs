// Magpie Actor Toolkit
//
// A minimal in-process actor/message-passing toolkit: independently running
// worker threads communicate exclusively through immutable shared messages
// delivered via blocking queues, with an optional multicaster that fans one
// push out to many independently buffered subscribers.
//
// The abstract contracts (the `Message` trait and the `MessageInput` /
// `MessageOutput` capability interfaces) live in the `magpie-api` crate;
// this crate provides the concrete machinery:
//
// - `queue`:     `BlockingQueue<T>`, the blocking/timed/coalescing FIFO
// - `mailbox`:   `MessageQueue` (both capabilities over one queue) and the
//                `NullMessageOutput` sink
// - `multicast`: `MessageMulticaster`, registration-order fan-out
// - `actor`:     the `Actor` behavior trait and its single-shot
//                `ActorHandle` thread wrapper
// - `logging`:   `tracing` subscriber presets
//
// Typical wiring: a producer holds a `MessageMulticaster` as its
// `MessageOutput`; each consumer registers a queue via `create_output()` and
// pops it as a `MessageInput` inside its own actor thread; a `StopMessage`
// terminates consumer loops by convention.

pub mod actor;
pub mod error;
pub mod logging;
pub mod mailbox;
pub mod multicast;
pub mod queue;

pub use actor::{Actor, ActorHandle};
pub use error::{ActorError, MulticastError};
pub use mailbox::{MessageQueue, NullMessageOutput, SharedMessageQueue};
pub use multicast::MessageMulticaster;
pub use queue::BlockingQueue;
