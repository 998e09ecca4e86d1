//! Frame outcome types.

use serde_json::Value;
use thiserror::Error;

/// Longest payload excerpt kept in a [`FrameParseError`].
const MAX_PAYLOAD_EXCERPT: usize = 200;

/// What a single complete frame turned into.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// A `data:` frame whose payload parsed as JSON.
    Record(Value),
    /// A `data:` frame whose payload was not valid JSON.
    ParseFailed(FrameParseError),
    /// A non-data frame (comment, keep-alive, `event:` line).
    Discarded,
}

/// A data frame whose payload could not be decoded as JSON.
///
/// Non-terminal: the frame is dropped and the stream carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid JSON in data frame: {message}")]
pub struct FrameParseError {
    /// The offending payload (marker stripped), truncated for logging.
    pub payload: String,
    /// The JSON parser's description of the problem.
    pub message: String,
}

impl FrameParseError {
    pub fn new(payload: impl Into<String>, message: impl Into<String>) -> Self {
        let mut payload = payload.into();
        if payload.len() > MAX_PAYLOAD_EXCERPT {
            let mut end = MAX_PAYLOAD_EXCERPT;
            while !payload.is_char_boundary(end) {
                end -= 1;
            }
            payload.truncate(end);
            payload.push('…');
        }
        Self {
            payload,
            message: message.into(),
        }
    }

    pub(crate) fn from_json(payload: &str, err: &serde_json::Error) -> Self {
        Self::new(payload, err.to_string())
    }
}
