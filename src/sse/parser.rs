//! Frame splitting and classification.
//!
//! Contains the stateful [`RecordParser`], which turns raw chunks into frame
//! outcomes, and the stateless [`classify_frame`].

use serde_json::Value;

use super::decoder::Utf8StreamDecoder;
use super::events::{FrameOutcome, FrameParseError};

/// Separates frames in the decoded text stream.
pub const FRAME_DELIMITER: &str = "\n\n";

/// Prefix of a frame that carries a JSON record.
pub const DATA_MARKER: &str = "data:";

/// Classify one complete frame.
///
/// Returns `None` for a blank frame (runs of extra newlines), which is not
/// counted as anything.
pub fn classify_frame(frame: &str) -> Option<FrameOutcome> {
    let frame = frame.trim_start();
    if frame.is_empty() {
        return None;
    }

    let Some(payload) = frame.strip_prefix(DATA_MARKER) else {
        return Some(FrameOutcome::Discarded);
    };

    let payload = payload.trim();
    match serde_json::from_str::<Value>(payload) {
        Ok(record) => Some(FrameOutcome::Record(record)),
        Err(e) => Some(FrameOutcome::ParseFailed(FrameParseError::from_json(
            payload, &e,
        ))),
    }
}

/// Stateful parser that accumulates chunks and emits complete frames.
///
/// Holds only the pending text after the last delimiter. Every byte is
/// either part of an emitted frame, still pending, or dropped at
/// [`finish`](Self::finish).
#[derive(Debug, Default)]
pub struct RecordParser {
    decoder: Utf8StreamDecoder,
    /// Decoded text not yet forming a complete frame
    buffer: String,
    /// Byte offset in `buffer` from which a new delimiter could start
    scan_from: usize,
    finished: bool,
}

impl RecordParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one transport chunk, returning the outcomes of every frame it
    /// completed, in order.
    ///
    /// Chunks fed after [`finish`](Self::finish) are ignored.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<FrameOutcome> {
        if self.finished {
            tracing::debug!(len = chunk.len(), "Ignoring chunk fed after finish");
            return Vec::new();
        }
        let text = self.decoder.decode(chunk);
        self.buffer.push_str(&text);
        self.drain_frames()
    }

    /// Signal end of input.
    ///
    /// A trailing unterminated `data:` frame gets one last parse attempt;
    /// anything else left over is dropped. The pending buffer is released.
    pub fn finish(&mut self) -> Vec<FrameOutcome> {
        if self.finished {
            return Vec::new();
        }
        self.finished = true;

        let tail = self.decoder.finish();
        self.buffer.push_str(&tail);
        let mut outcomes = self.drain_frames();

        let rest = std::mem::take(&mut self.buffer);
        self.scan_from = 0;
        if let Some(outcome) = classify_frame(&rest) {
            if outcome == FrameOutcome::Discarded {
                tracing::debug!(len = rest.len(), "Discarding unterminated trailing frame");
            }
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Bytes of decoded text waiting for a delimiter.
    pub fn pending_len(&self) -> usize {
        self.buffer.len() + self.decoder.pending_bytes()
    }

    /// Whether [`finish`](Self::finish) has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn drain_frames(&mut self) -> Vec<FrameOutcome> {
        let mut outcomes = Vec::new();
        let mut start = 0;
        let delimiter = FRAME_DELIMITER.as_bytes();

        while let Some(offset) = find_delimiter(&self.buffer.as_bytes()[self.scan_from..]) {
            let end = self.scan_from + offset;
            if let Some(outcome) = classify_frame(&self.buffer[start..end]) {
                outcomes.push(outcome);
            }
            start = end + delimiter.len();
            self.scan_from = start;
        }

        if start > 0 {
            self.buffer.drain(..start);
        }
        // The last byte may be the first half of a delimiter split across chunks.
        self.scan_from = self.buffer.len().saturating_sub(delimiter.len() - 1);
        outcomes
    }
}

fn find_delimiter(haystack: &[u8]) -> Option<usize> {
    haystack
        .windows(FRAME_DELIMITER.len())
        .position(|window| window == FRAME_DELIMITER.as_bytes())
}
