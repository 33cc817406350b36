// One producer fanning out to several subscriber actors.
//
// The producer holds the multicaster as its single output; every subscriber
// gets an independently buffered queue from `create_output()` and reports
// how many updates it saw once the stop message arrives.

use std::sync::Arc;

use magpie::logging;
use magpie::{Actor, ActorError, ActorHandle, MessageMulticaster, MessageQueue, SharedMessageQueue};
use magpie_api::{
    msg_cast, MessageInput, MessageOutput, SharedMessageOutput, StopMessage, TextMessage,
};

struct SubscriberActor {
    id: usize,
    inbox: SharedMessageQueue,
    results: SharedMessageOutput,
}

impl Actor for SubscriberActor {
    fn name(&self) -> String {
        format!("subscriber-{}", self.id)
    }

    fn run(&mut self) {
        let mut updates = 0usize;
        loop {
            let msg = self.inbox.pop();
            if msg_cast::<StopMessage>(&msg).is_some() {
                break;
            }
            if let Some(text) = msg_cast::<TextMessage>(&msg) {
                logging::info!(subscriber = self.id, update = text.text(), "received");
                updates += 1;
            }
        }
        self.results.push(TextMessage::create(format!(
            "subscriber {} saw {} updates",
            self.id, updates
        )));
    }
}

fn main() -> Result<(), ActorError> {
    logging::init_default();

    const SUBSCRIBERS: usize = 3;

    let results = Arc::new(MessageQueue::new());
    let mut caster = MessageMulticaster::new();

    // Wire everything up before the first push.
    let mut handles = Vec::with_capacity(SUBSCRIBERS);
    for id in 0..SUBSCRIBERS {
        let inbox = caster.create_output();
        handles.push(ActorHandle::spawn(SubscriberActor {
            id,
            inbox,
            results: results.clone(),
        })?);
    }

    for update in ["sunrise", "noon", "sunset", "midnight"] {
        caster.push(TextMessage::create(update));
    }
    caster.push(StopMessage::create());

    for _ in 0..SUBSCRIBERS {
        logging::info!(report = results.pop().describe(), "subscriber done");
    }
    for mut handle in handles {
        handle.join();
    }
    Ok(())
}
