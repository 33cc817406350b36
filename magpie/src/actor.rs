//! The actor lifecycle wrapper: one behavior, one owned worker thread.

use std::panic;
use std::thread::{self, JoinHandle};

use tracing::{debug, error};

use crate::error::ActorError;

/// Behavior of an actor: a loop that runs to completion exactly once on a
/// dedicated worker thread.
///
/// The trait owns no queue. Wire message endpoints in as fields: typically a
/// [`MessageInput`](magpie_api::MessageInput) to pop from, dispatching on
/// the variant (a [`StopMessage`](magpie_api::StopMessage) conventionally
/// ends the loop), and a [`MessageOutput`](magpie_api::MessageOutput) for
/// results.
///
/// A panic escaping `run` is not caught by the wrapper: it terminates the
/// worker thread, and any queue wired to this actor is left permanently
/// unconsumed. Peers detect that through
/// [`ActorHandle::is_running`]/[`ActorHandle::join`], not through queue
/// state.
pub trait Actor: Send + 'static {
    /// Name used for the worker thread, for diagnostics.
    fn name(&self) -> String {
        "actor".to_string()
    }

    /// The thread body.
    fn run(&mut self);
}

/// Owns the worker thread of one started [`Actor`].
///
/// Single-shot state machine: idle, running, completed, joined. A handle
/// cannot be restarted once started; a second [`start`](Self::start) fails
/// with [`ActorError::AlreadyStarted`] even after the join, keeping the
/// terminal state explicit.
///
/// Dropping a handle without joining detaches the thread; it keeps running
/// to completion on its own.
#[derive(Debug, Default)]
pub struct ActorHandle {
    thread: Option<JoinHandle<()>>,
    started: bool,
}

impl ActorHandle {
    /// Creates an idle handle. [`join`](Self::join) on an idle handle
    /// returns `false` immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a handle and starts `actor` on it right away.
    pub fn spawn<A: Actor>(actor: A) -> Result<Self, ActorError> {
        let mut handle = Self::new();
        handle.start(actor)?;
        Ok(handle)
    }

    /// Spawns the worker thread running `actor`'s loop.
    ///
    /// The thread is named after [`Actor::name`]. Fails with
    /// [`ActorError::AlreadyStarted`] if this handle was ever started
    /// before, or with [`ActorError::Spawn`] if the OS refuses the thread.
    pub fn start<A: Actor>(&mut self, mut actor: A) -> Result<(), ActorError> {
        if self.started {
            return Err(ActorError::AlreadyStarted);
        }

        let name = actor.name();
        let thread = thread::Builder::new().name(name.clone()).spawn(move || {
            debug!(actor = %name, "actor thread started");
            actor.run();
            debug!(actor = %name, "actor thread finished");
        })?;

        self.thread = Some(thread);
        self.started = true;
        Ok(())
    }

    /// Whether this handle holds a live, joinable thread: true from
    /// [`start`](Self::start) until [`join`](Self::join), including after
    /// the loop has returned but before the join.
    pub fn is_running(&self) -> bool {
        self.thread.is_some()
    }

    /// Blocks until the actor's loop returns.
    ///
    /// Returns `false` immediately when there is no thread to join (never
    /// started, or already joined); `true` after joining a live thread. If
    /// the worker panicked, the panic is re-raised here in the joining
    /// thread after being logged.
    pub fn join(&mut self) -> bool {
        match self.thread.take() {
            None => false,
            Some(thread) => {
                let name = thread.thread().name().unwrap_or("actor").to_string();
                if let Err(payload) = thread.join() {
                    error!(actor = %name, "actor thread panicked");
                    panic::resume_unwind(payload);
                }
                true
            }
        }
    }
}
