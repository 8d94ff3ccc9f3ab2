//! Page-wide data channel shared by the host page and the overlay.
//!
//! Kept out of the wasm-only `web` module so delivery can be unit-tested on
//! the host.

use improv_scoreboard::channel::{DataChannel, DataMessage, LocalBus};

thread_local! {
    static PAGE_BUS: LocalBus = LocalBus::new();
}

/// Handle to this thread's page bus.
pub fn page_bus() -> LocalBus {
    PAGE_BUS.with(LocalBus::clone)
}

/// Forward one transport message to every overlay subscribed to `topic`.
pub fn deliver(topic: &str, payload: Option<Vec<u8>>) -> usize {
    let message = DataMessage {
        topic: topic.to_string(),
        payload,
    };
    PAGE_BUS.with(|bus| bus.publish(&message))
}
