//! Messages sent from a search task back to the view controller.

use serde_json::Value;

use crate::error::StreamError;
use crate::sse::{FrameParseError, ReadSummary};

/// One event of a running search, tagged with the search's generation.
///
/// The controller drops any message whose generation is not current.
#[derive(Debug, Clone, PartialEq)]
pub enum ExploreMessage {
    /// A record arrived
    Record { generation: u64, record: Value },
    /// A data frame could not be parsed; the stream continues
    ParseFailed {
        generation: u64,
        error: FrameParseError,
    },
    /// The stream ended cleanly
    Completed {
        generation: u64,
        summary: ReadSummary,
    },
    /// The stream failed; sent at most once per search
    Failed { generation: u64, error: StreamError },
}

impl ExploreMessage {
    pub fn generation(&self) -> u64 {
        match self {
            ExploreMessage::Record { generation, .. }
            | ExploreMessage::ParseFailed { generation, .. }
            | ExploreMessage::Completed { generation, .. }
            | ExploreMessage::Failed { generation, .. } => *generation,
        }
    }

    /// Whether this message ends its search.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ExploreMessage::Completed { .. } | ExploreMessage::Failed { .. }
        )
    }
}
