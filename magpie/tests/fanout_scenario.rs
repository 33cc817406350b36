// End-to-end wiring of the toolkit: a producer pushing through the
// multicaster into consumer actors, terminated by the conventional stop
// message.

use std::sync::Arc;
use std::time::Duration;

use magpie::logging;
use magpie::{Actor, ActorHandle, MessageMulticaster, MessageQueue, SharedMessageQueue};
use magpie_api::{
    msg_cast, MessageInput, MessageOutput, SharedMessageOutput, StopMessage, TextMessage,
};

/// Counts text messages until the stop message, then reports the count.
struct CountingConsumer {
    label: &'static str,
    inbox: SharedMessageQueue,
    results: SharedMessageOutput,
}

impl Actor for CountingConsumer {
    fn name(&self) -> String {
        self.label.to_string()
    }

    fn run(&mut self) {
        let mut texts = 0usize;
        loop {
            let msg = self.inbox.pop();
            if msg_cast::<StopMessage>(&msg).is_some() {
                break;
            }
            if msg_cast::<TextMessage>(&msg).is_some() {
                texts += 1;
            }
        }
        self.results
            .push(TextMessage::create(format!("{}:{}", self.label, texts)));
    }
}

#[test]
fn each_subscriber_sees_text_then_stop_in_order() {
    logging::init_test();

    let mut caster = MessageMulticaster::new();
    let first = caster.create_output();
    let second = caster.create_output();

    caster.push(TextMessage::create("hello"));
    caster.push(StopMessage::create());

    for queue in [&first, &second] {
        let text = queue
            .timed_pop(Duration::from_secs(5))
            .expect("text message delivered");
        assert!(msg_cast::<TextMessage>(&text).is_some());
        assert_eq!(text.describe(), "hello");

        let stop = queue
            .timed_pop(Duration::from_secs(5))
            .expect("stop message delivered");
        assert!(msg_cast::<StopMessage>(&stop).is_some());
        assert_eq!(stop.describe(), "stop");

        assert!(queue.is_empty());
    }
}

#[test]
fn consumer_actors_process_one_text_message_then_exit() {
    logging::init_test();

    let results = Arc::new(MessageQueue::new());
    let mut caster = MessageMulticaster::new();

    let mut handles = Vec::new();
    for label in ["left", "right"] {
        let inbox = caster.create_output();
        handles.push(
            ActorHandle::spawn(CountingConsumer {
                label,
                inbox,
                results: results.clone(),
            })
            .unwrap(),
        );
    }

    // The producer treats the multicaster as a plain output.
    let producer: &dyn MessageOutput = &caster;
    producer.push(TextMessage::create("hello"));
    producer.push(StopMessage::create());

    let mut reports = Vec::new();
    for _ in 0..handles.len() {
        let report = results
            .timed_pop(Duration::from_secs(5))
            .expect("consumer reported before timeout");
        reports.push(report.describe());
    }
    reports.sort();
    assert_eq!(reports, vec!["left:1", "right:1"]);

    for handle in &mut handles {
        assert!(handle.join());
        assert!(!handle.is_running());
    }
}

#[test]
fn stalled_consumer_queue_stays_buffered_while_others_drain() {
    logging::init_test();

    let mut caster = MessageMulticaster::new();
    let active = caster.create_output();
    let stalled = caster.create_output();

    for i in 0..3 {
        caster.push(TextMessage::create(format!("update {i}")));
    }

    for i in 0..3 {
        let msg = active
            .timed_pop(Duration::from_secs(5))
            .expect("buffered update");
        assert_eq!(msg.describe(), format!("update {i}"));
    }

    // The slow subscriber still has its own complete backlog; the freshest
    // value wins once it finally reads.
    assert_eq!(stalled.len(), 3);
    assert_eq!(stalled.pop_most_recent().describe(), "update 2");
    assert!(stalled.is_empty());
}
