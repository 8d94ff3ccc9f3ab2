//! Improv-battle scoreboard overlay for the browser, rendered with Leptos.
//!
//! The overlay subscribes to the `scoreboard` topic on [`bridge::page_bus`]
//! and redraws the round cards whenever a snapshot arrives. The host page
//! pushes its transport traffic in through the exported
//! `deliverDataMessage(topic, payload)` function, usually from the room's
//! data-received callback.
//!
//! The Leptos view only exists with `--features web` on `wasm32`. Host builds
//! keep [`bridge`] so delivery stays testable, and their [`start`] mounts
//! nothing.

pub mod bridge;

/// Host builds have no document to mount the overlay into; this only logs
/// that the overlay was skipped.
#[cfg(not(all(feature = "web", target_arch = "wasm32")))]
pub fn start() {
    tracing::info!(
        subscribers = bridge::page_bus().subscriber_count(),
        "scoreboard overlay needs the browser build; nothing mounted"
    );
}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::start;
