//! Scoreboard snapshots as published by the game agent.
//!
//! Every message on the scoreboard channel carries a complete snapshot; there
//! is no delta format. Absent fields take their defaults and `null` round
//! text reads as empty; a value of the wrong JSON type rejects the message.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

pub const DEFAULT_MAX_ROUNDS: i64 = 3;
pub const INTRO_PHASE: &str = "intro";

/// One finished round as judged by the agent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundResult {
    /// Display label; not required to be unique or ordered.
    #[serde(deserialize_with = "nullable")]
    pub round: i64,
    #[serde(deserialize_with = "nullable")]
    pub scenario: String,
    #[serde(deserialize_with = "nullable")]
    pub critique: String,
    /// Free-text rating such as "Great", "Okay" or "Weird".
    #[serde(deserialize_with = "nullable")]
    pub rating: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoreboardSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    pub current_round: i64,
    pub max_rounds: i64,
    /// Stored for completeness; the overlay never branches on it.
    pub phase: String,
    pub rounds: Vec<RoundResult>,
}

impl Default for ScoreboardSnapshot {
    fn default() -> Self {
        Self {
            player_name: None,
            current_round: 0,
            max_rounds: DEFAULT_MAX_ROUNDS,
            phase: INTRO_PHASE.to_string(),
            rounds: Vec::new(),
        }
    }
}

impl ScoreboardSnapshot {
    pub fn has_rounds(&self) -> bool {
        !self.rounds.is_empty()
    }

    /// Player name worth displaying; blank names count as absent.
    pub fn display_player_name(&self) -> Option<&str> {
        self.player_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("payload is not a scoreboard snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode raw channel bytes into a snapshot.
pub fn decode_payload(bytes: &[u8]) -> Result<ScoreboardSnapshot, PayloadError> {
    let text = std::str::from_utf8(bytes)?;
    Ok(serde_json::from_str(text)?)
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
