//! # improv_scoreboard
//!
//! Scoreboard overlay for a live "improv battle" voice session.
//!
//! A remote agent pushes JSON snapshots on the `scoreboard` data channel. The
//! widget keeps the most recent snapshot that parsed, and renders a small
//! floating panel listing every finished round with a coloured rating badge.
//!
//! ## Quick Start
//!
//! ```
//! use improv_scoreboard::prelude::*;
//!
//! let bus = LocalBus::new();
//! let board = Scoreboard::mount(&bus, ScoreboardConfig::default(), |_panel| {});
//!
//! bus.publish(&DataMessage::new(
//!     SCOREBOARD_TOPIC,
//!     br#"{"currentRound":1,"maxRounds":3,"rounds":[{"round":1,"scenario":"A talking toaster","critique":"Too quiet","rating":"Okay"}]}"#.to_vec(),
//! ));
//!
//! let panel = board.panel().unwrap();
//! assert_eq!(panel.round_line, "Round: 1 / 3");
//! assert_eq!(panel.cards[0].badge.tone, BadgeTone::Neutral);
//! ```
//!
//! ## Feature Flags
//!
//! - `feed`: async pump reading newline-delimited data-channel frames (tokio)
//! - `cli` (default): the `scoreboard-cli` terminal viewer
//!
//! The browser component lives in the `scoreboard_web` workspace member and
//! depends on this crate with default features disabled.

pub mod badge;
pub mod channel;
pub mod config;
#[cfg(feature = "feed")]
pub mod feed;
pub mod snapshot;
pub mod view;
pub mod widget;

/// Data-channel topic the agent publishes scoreboard snapshots on.
pub const SCOREBOARD_TOPIC: &str = "scoreboard";

pub mod prelude {
    pub use crate::badge::BadgeTone;
    pub use crate::channel::{DataChannel, DataMessage, LocalBus, Subscription};
    pub use crate::config::ScoreboardConfig;
    pub use crate::snapshot::{decode_payload, PayloadError, RoundResult, ScoreboardSnapshot};
    pub use crate::view::{render_html, render_text, PanelView, RoundCard};
    pub use crate::widget::{MessageOutcome, Scoreboard, ScoreboardModel};
    pub use crate::SCOREBOARD_TOPIC;
}
