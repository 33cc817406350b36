use thiserror::Error;

use crate::types::SharedMessage;

/// Error raised by a consumer that received a message variant it cannot
/// handle.
///
/// The messaging layer itself never produces this; it exists so consumer
/// loops have a uniform way to report an unexpected variant, carrying the
/// offending message's diagnostic text.
///
/// # Examples
///
/// ```rust
/// use magpie_api::{BadMessage, TextMessage};
///
/// let msg = TextMessage::create("hello");
/// let err = BadMessage::new(&msg);
/// assert!(err.to_string().starts_with("BadMessage: "));
/// assert!(err.to_string().ends_with(": hello"));
/// ```
#[derive(Error, Debug, Clone)]
#[error("BadMessage: {detail}")]
pub struct BadMessage {
    detail: String,
}

impl BadMessage {
    pub fn new(message: &SharedMessage) -> Self {
        Self {
            detail: format!("{}: {}", message.type_name(), message.describe()),
        }
    }

    /// For consumers whose input produced no message at all.
    pub fn absent() -> Self {
        Self {
            detail: "null".to_string(),
        }
    }
}

impl From<&SharedMessage> for BadMessage {
    fn from(message: &SharedMessage) -> Self {
        Self::new(message)
    }
}

impl From<Option<&SharedMessage>> for BadMessage {
    fn from(message: Option<&SharedMessage>) -> Self {
        match message {
            Some(message) => Self::new(message),
            None => Self::absent(),
        }
    }
}
