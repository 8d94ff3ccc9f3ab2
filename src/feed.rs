//! Newline-delimited data-channel feed.
//!
//! Each line is one JSON [`FeedFrame`]: a topic plus the payload bytes as
//! lowercase hex (so non-UTF-8 payloads survive the trip). Lines that do not
//! parse are logged and skipped; the feed only stops at EOF or on an I/O
//! error.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::channel::{DataChannel, DataMessage};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedFrame {
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("invalid frame: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid payload hex: {0}")]
    Hex(&'static str),
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed read failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FeedStats {
    pub delivered: u64,
    pub skipped: u64,
}

impl FeedFrame {
    pub fn from_message(message: &DataMessage) -> Self {
        Self {
            topic: message.topic.clone(),
            payload: message.payload.as_deref().map(hex_encode),
        }
    }

    pub fn parse_line(line: &str) -> Result<Self, FrameError> {
        Ok(serde_json::from_str(line)?)
    }

    pub fn to_line(&self) -> Result<String, FrameError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn into_message(self) -> Result<DataMessage, FrameError> {
        let payload = match self.payload {
            Some(hex) => Some(hex_decode(&hex)?),
            None => None,
        };
        Ok(DataMessage {
            topic: self.topic,
            payload,
        })
    }
}

/// Read frames from `reader` until EOF, publishing each on `channel`.
pub async fn pump<R, C>(mut reader: R, channel: &C) -> Result<FeedStats, FeedError>
where
    R: AsyncBufRead + Unpin,
    C: DataChannel + ?Sized,
{
    let mut stats = FeedStats::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let Ok(line) = std::str::from_utf8(&buf) else {
            warn!("skipping feed line that is not UTF-8");
            stats.skipped += 1;
            continue;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match FeedFrame::parse_line(line).and_then(FeedFrame::into_message) {
            Ok(message) => {
                let ran = channel.publish(&message);
                debug!(topic = %message.topic, handlers = ran, "frame delivered");
                stats.delivered += 1;
            }
            Err(e) => {
                warn!("skipping feed line: {}", e);
                stats.skipped += 1;
            }
        }
    }

    Ok(stats)
}

pub fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(HEX[(b >> 4) as usize] as char);
        out.push(HEX[(b & 0x0f) as usize] as char);
    }
    out
}

pub fn hex_decode(hex: &str) -> Result<Vec<u8>, FrameError> {
    let hex = hex.trim();
    if hex.len() % 2 != 0 {
        return Err(FrameError::Hex("odd number of digits"));
    }

    let bytes = hex.as_bytes();
    let mut out = Vec::with_capacity(bytes.len() / 2);
    for pair in bytes.chunks_exact(2) {
        let hi = from_hex_digit(pair[0]).ok_or(FrameError::Hex("non-hex digit"))?;
        let lo = from_hex_digit(pair[1]).ok_or(FrameError::Hex("non-hex digit"))?;
        out.push((hi << 4) | lo);
    }
    Ok(out)
}

fn from_hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
