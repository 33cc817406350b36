use crate::mailbox::{MessageInput, MessageOutput};
use crate::message::Message;
use std::sync::Arc;

// Type aliases for the shared handles passed between actors
pub type SharedMessage = Arc<dyn Message>;
pub type SharedMessageInput = Arc<dyn MessageInput>;
pub type SharedMessageOutput = Arc<dyn MessageOutput>;
