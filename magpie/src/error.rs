use std::io;
use thiserror::Error;

/// Errors related to the actor lifecycle.
#[derive(Error, Debug)]
pub enum ActorError {
    #[error("Actor has already been started")]
    AlreadyStarted,
    #[error("Failed to spawn actor thread: {0}")]
    Spawn(#[from] io::Error),
}

/// Errors related to multicaster output registration.
#[derive(Error, Debug, Clone)]
pub enum MulticastError {
    #[error("Invalid output: absent output handle")]
    InvalidOutput,
}
