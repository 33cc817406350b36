//! # Message Abstraction
//!
//! This module defines the polymorphic message type passed between actors.
//! A message is an immutable value shared through a reference-counted handle
//! ([`SharedMessage`]); many queues may hold the same instance concurrently
//! and the payload is never copied on delivery.
//!
//! Variants are open: any `Send + Sync + 'static` type can implement
//! [`Message`]. Consumers recover a concrete variant with [`msg_cast`], a
//! capability query that returns the message viewed as the requested type,
//! or `None` when the runtime type differs. It never panics and leaves the
//! original handle intact.
//!
//! Two structural variants ship with the toolkit: [`TextMessage`] for plain
//! text payloads and [`StopMessage`], the conventional sentinel that tells a
//! consuming actor to end its loop.

use downcast_rs::{impl_downcast, DowncastSync};
use std::any::type_name;
use std::sync::Arc;

use crate::types::SharedMessage;

/// Core trait for actor messages.
///
/// Implementations must be immutable after construction: a message may be
/// observed from several consumer threads at once through shared handles.
///
/// # Examples
///
/// ```rust
/// use magpie_api::message::{msg_cast, Message};
/// use std::sync::Arc;
///
/// #[derive(Debug)]
/// struct Tick {
///     sequence: u64,
/// }
///
/// impl Message for Tick {}
///
/// let msg: magpie_api::SharedMessage = Arc::new(Tick { sequence: 7 });
/// let tick = msg_cast::<Tick>(&msg).expect("runtime type is Tick");
/// assert_eq!(tick.sequence, 7);
/// ```
pub trait Message: DowncastSync {
    /// Name of the concrete message type, for diagnostics.
    fn type_name(&self) -> &'static str {
        type_name::<Self>()
    }

    /// Diagnostic representation of this message.
    ///
    /// Defaults to the concrete type name; textual variants return their
    /// stored text instead.
    fn describe(&self) -> String {
        self.type_name().to_string()
    }
}
impl_downcast!(sync Message);

/// Views a shared message as concrete variant `T`.
///
/// Returns a shared handle to the same instance when the runtime type
/// matches, `None` otherwise. The input handle is cloned, never consumed,
/// so a failed query costs one reference-count round trip and nothing else.
pub fn msg_cast<T: Message>(message: &SharedMessage) -> Option<Arc<T>> {
    message.clone().downcast_arc::<T>().ok()
}

/// A message carrying a plain text payload.
#[derive(Debug, Clone)]
pub struct TextMessage {
    text: String,
}

impl TextMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Named factory producing a ready-to-push shared handle.
    pub fn create(text: impl Into<String>) -> SharedMessage {
        Arc::new(Self::new(text))
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Message for TextMessage {
    fn describe(&self) -> String {
        self.text.clone()
    }
}

/// The conventional "terminate your loop" sentinel.
///
/// Carries a text payload like [`TextMessage`] (default `"stop"`), but is a
/// distinct variant so consumers can dispatch on it before falling through
/// to general text handling.
#[derive(Debug, Clone)]
pub struct StopMessage {
    text: String,
}

impl StopMessage {
    /// Text carried by a default-constructed stop message.
    pub const DEFAULT_TEXT: &'static str = "stop";

    pub fn new() -> Self {
        Self::with_text(Self::DEFAULT_TEXT)
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Named factory producing a ready-to-push shared handle.
    pub fn create() -> SharedMessage {
        Arc::new(Self::new())
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Default for StopMessage {
    fn default() -> Self {
        Self::new()
    }
}

impl Message for StopMessage {
    fn describe(&self) -> String {
        self.text.clone()
    }
}
