// Two actors exchanging text messages over a pair of queues.
//
// Each actor owns its inbox as a `MessageInput` and holds the peer's inbox
// as a `MessageOutput`; the ping side ends the exchange with a stop message.

use std::sync::Arc;

use magpie::logging;
use magpie::{Actor, ActorHandle, ActorError, MessageQueue, SharedMessageQueue};
use magpie_api::{
    msg_cast, BadMessage, MessageInput, MessageOutput, SharedMessageOutput, StopMessage,
    TextMessage,
};

struct PingActor {
    replies: SharedMessageQueue,
    peer: SharedMessageOutput,
    rounds: u32,
}

impl Actor for PingActor {
    fn name(&self) -> String {
        "ping".to_string()
    }

    fn run(&mut self) {
        for round in 0..self.rounds {
            self.peer.push(TextMessage::create(format!("ping {round}")));

            let reply = self.replies.pop();
            match msg_cast::<TextMessage>(&reply) {
                Some(text) => logging::info!(reply = text.text(), "ping received"),
                None => logging::warn!(error = %BadMessage::new(&reply), "unexpected reply"),
            }
        }
        self.peer.push(StopMessage::create());
    }
}

struct PongActor {
    inbox: SharedMessageQueue,
    peer: SharedMessageOutput,
}

impl Actor for PongActor {
    fn name(&self) -> String {
        "pong".to_string()
    }

    fn run(&mut self) {
        loop {
            let msg = self.inbox.pop();
            if msg_cast::<StopMessage>(&msg).is_some() {
                break;
            }
            match msg_cast::<TextMessage>(&msg) {
                Some(text) => self
                    .peer
                    .push(TextMessage::create(format!("pong ({})", text.text()))),
                None => logging::warn!(error = %BadMessage::new(&msg), "unexpected message"),
            }
        }
    }
}

fn main() -> Result<(), ActorError> {
    logging::init_default();

    let ping_inbox = Arc::new(MessageQueue::new());
    let pong_inbox = Arc::new(MessageQueue::new());

    let mut ping = ActorHandle::spawn(PingActor {
        replies: ping_inbox.clone(),
        peer: pong_inbox.clone(),
        rounds: 5,
    })?;
    let mut pong = ActorHandle::spawn(PongActor {
        inbox: pong_inbox,
        peer: ping_inbox,
    })?;

    ping.join();
    pong.join();
    Ok(())
}
