//! Async reader that drives a [`RecordParser`] from a live byte stream.

use std::time::Duration;

use bytes::Bytes;
use futures::Stream;
use futures_util::StreamExt;

use super::events::FrameOutcome;
use super::parser::RecordParser;
use crate::error::StreamError;
use crate::traits::{HttpError, RecordSink};

/// Lifecycle of one reader.
///
/// `Completed` and `Failed` are terminal. A new search builds a new reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    Idle,
    Requesting,
    Streaming,
    Completed,
    Failed,
}

impl ReaderState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReaderState::Completed | ReaderState::Failed)
    }
}

/// Counters for one finished stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadSummary {
    /// Records handed to the sink
    pub records: usize,
    /// Data frames dropped because of invalid JSON
    pub parse_errors: usize,
    /// Non-data frames dropped
    pub discarded_frames: usize,
    /// Raw bytes received from the transport
    pub bytes: usize,
}

/// Consumes a chunked response body and emits parsed records in order.
///
/// # Example
///
/// ```ignore
/// use virtuary::sse::StreamingRecordReader;
///
/// let mut reader = StreamingRecordReader::new(Some(Duration::from_secs(30)));
/// let mut records: Vec<serde_json::Value> = Vec::new();
/// let summary = reader.read(body, &mut records).await?;
/// ```
#[derive(Debug)]
pub struct StreamingRecordReader {
    state: ReaderState,
    parser: RecordParser,
    read_timeout: Option<Duration>,
    summary: ReadSummary,
}

impl StreamingRecordReader {
    /// Create a reader. `read_timeout` bounds the wait for each chunk.
    pub fn new(read_timeout: Option<Duration>) -> Self {
        Self {
            state: ReaderState::Idle,
            parser: RecordParser::new(),
            read_timeout,
            summary: ReadSummary::default(),
        }
    }

    pub fn state(&self) -> ReaderState {
        self.state
    }

    /// Counters so far. Final once the reader is terminal.
    pub fn summary(&self) -> ReadSummary {
        self.summary
    }

    /// Mark the request as issued (`Idle → Requesting`).
    pub fn begin_request(&mut self) {
        if self.state == ReaderState::Idle {
            self.state = ReaderState::Requesting;
        }
    }

    /// Mark the reader failed without streaming, e.g. when the request
    /// itself was rejected. Returns the error for convenience.
    pub fn fail(&mut self, error: StreamError) -> StreamError {
        self.state = ReaderState::Failed;
        self.release();
        error
    }

    /// Read the stream to its end, forwarding records to `sink`.
    ///
    /// Returns the summary on a clean end of stream. A transport error or
    /// read timeout ends the read with an error; records already delivered to
    /// the sink are unaffected.
    pub async fn read<S, K>(
        &mut self,
        mut stream: S,
        sink: &mut K,
    ) -> Result<ReadSummary, StreamError>
    where
        S: Stream<Item = Result<Bytes, HttpError>> + Unpin,
        K: RecordSink + ?Sized,
    {
        if self.state.is_terminal() {
            return Err(StreamError::ReaderFinished);
        }
        self.state = ReaderState::Streaming;

        loop {
            let next = match self.read_timeout {
                Some(after) => match tokio::time::timeout(after, stream.next()).await {
                    Ok(next) => next,
                    Err(_) => {
                        tracing::warn!("Stream stalled for {:?}", after);
                        return Err(self.fail(StreamError::Timeout { after }));
                    }
                },
                None => stream.next().await,
            };

            match next {
                Some(Ok(chunk)) => {
                    self.summary.bytes += chunk.len();
                    tracing::trace!(len = chunk.len(), "Received chunk");
                    let outcomes = self.parser.feed(&chunk);
                    self.dispatch(outcomes, sink);
                }
                Some(Err(e)) => {
                    tracing::error!("Stream transport failed: {}", e);
                    return Err(self.fail(StreamError::from(e)));
                }
                None => break,
            }
        }

        let outcomes = self.parser.finish();
        self.dispatch(outcomes, sink);
        self.state = ReaderState::Completed;
        self.release();

        tracing::debug!(
            records = self.summary.records,
            parse_errors = self.summary.parse_errors,
            discarded = self.summary.discarded_frames,
            "Stream completed"
        );
        Ok(self.summary)
    }

    fn dispatch<K>(&mut self, outcomes: Vec<FrameOutcome>, sink: &mut K)
    where
        K: RecordSink + ?Sized,
    {
        for outcome in outcomes {
            match outcome {
                FrameOutcome::Record(record) => {
                    self.summary.records += 1;
                    sink.on_record(record);
                }
                FrameOutcome::ParseFailed(err) => {
                    self.summary.parse_errors += 1;
                    sink.on_parse_error(&err);
                }
                FrameOutcome::Discarded => {
                    self.summary.discarded_frames += 1;
                }
            }
        }
    }

    fn release(&mut self) {
        self.parser = RecordParser::new();
    }
}
