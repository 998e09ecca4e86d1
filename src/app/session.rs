//! Search task orchestration.
//!
//! Each search runs on its own tokio task: open the stream, run the reader,
//! and forward records and the terminal outcome to the controller over an
//! unbounded channel. Starting a new search aborts the previous task.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::messages::ExploreMessage;
use crate::client::ExploreClient;
use crate::error::StreamError;
use crate::sse::{FrameParseError, StreamingRecordReader};
use crate::startup::ExploreConfig;
use crate::traits::{ByteStream, HttpClient, RecordSink};
use crate::view_state::SearchTicket;

/// Sink that forwards records of one generation to the controller.
struct ChannelSink<'a> {
    generation: u64,
    tx: &'a mpsc::UnboundedSender<ExploreMessage>,
}

impl RecordSink for ChannelSink<'_> {
    fn on_record(&mut self, record: serde_json::Value) {
        let _ = self.tx.send(ExploreMessage::Record {
            generation: self.generation,
            record,
        });
    }

    fn on_parse_error(&mut self, error: &FrameParseError) {
        tracing::warn!(
            generation = self.generation,
            payload = %error.payload,
            "Dropping data frame: {}",
            error.message
        );
        let _ = self.tx.send(ExploreMessage::ParseFailed {
            generation: self.generation,
            error: error.clone(),
        });
    }
}

struct InFlight {
    generation: u64,
    handle: JoinHandle<()>,
}

/// Runs explore searches in the background.
///
/// Must be used from within a tokio runtime.
pub struct ExploreSession {
    client: ExploreClient,
    read_timeout: Option<Duration>,
    message_tx: mpsc::UnboundedSender<ExploreMessage>,
    in_flight: Option<InFlight>,
}

impl ExploreSession {
    /// Create a session and the receiver its messages arrive on.
    pub fn new(
        http: Arc<dyn HttpClient>,
        config: &ExploreConfig,
    ) -> (Self, mpsc::UnboundedReceiver<ExploreMessage>) {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let session = Self {
            client: ExploreClient::new(http, config),
            read_timeout: config.read_timeout,
            message_tx,
            in_flight: None,
        };
        (session, message_rx)
    }

    /// Start the search described by `ticket`, superseding any running one.
    pub fn search(&mut self, ticket: &SearchTicket) {
        self.cancel();

        let client = self.client.clone();
        let tx = self.message_tx.clone();
        let read_timeout = self.read_timeout;
        let generation = ticket.generation;
        let location = ticket.location.clone();

        tracing::info!(generation, location = %location, "Starting explore search");

        let handle = tokio::spawn(async move {
            run_search(client, location, generation, read_timeout, tx).await;
        });
        self.in_flight = Some(InFlight { generation, handle });
    }

    /// Abort the running search, if any. No further messages of its
    /// generation are sent.
    pub fn cancel(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            if !in_flight.handle.is_finished() {
                tracing::debug!(generation = in_flight.generation, "Aborting superseded search");
            }
            in_flight.handle.abort();
        }
    }

    /// Whether a search task is still running.
    pub fn is_active(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|f| !f.handle.is_finished())
    }

    /// Generation of the most recently started search.
    pub fn active_generation(&self) -> Option<u64> {
        self.in_flight.as_ref().map(|f| f.generation)
    }
}

impl Drop for ExploreSession {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run_search(
    client: ExploreClient,
    location: String,
    generation: u64,
    read_timeout: Option<Duration>,
    tx: mpsc::UnboundedSender<ExploreMessage>,
) {
    let mut reader = StreamingRecordReader::new(read_timeout);
    reader.begin_request();

    let outcome = match open_within(&client, &location, read_timeout).await {
        Ok(stream) => {
            let mut sink = ChannelSink {
                generation,
                tx: &tx,
            };
            reader.read(stream, &mut sink).await
        }
        Err(error) => Err(reader.fail(error)),
    };

    let message = match outcome {
        Ok(summary) => {
            tracing::info!(generation, records = summary.records, "Explore search finished");
            ExploreMessage::Completed {
                generation,
                summary,
            }
        }
        Err(error) => {
            tracing::error!(generation, "Explore search failed: {}", error);
            ExploreMessage::Failed { generation, error }
        }
    };
    let _ = tx.send(message);
}

/// Open the stream, giving up once `read_timeout` passes without a response.
async fn open_within(
    client: &ExploreClient,
    location: &str,
    read_timeout: Option<Duration>,
) -> Result<ByteStream, StreamError> {
    let Some(after) = read_timeout else {
        return client.open_stream(location).await;
    };
    match tokio::time::timeout(after, client.open_stream(location)).await {
        Ok(opened) => opened,
        Err(_) => {
            tracing::warn!("No response within {:?}", after);
            Err(StreamError::Timeout { after })
        }
    }
}
