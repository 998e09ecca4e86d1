//! Common helpers for integration tests.
//!
//! # Example
//!
//! ```ignore
//! use common::{frames, split_every, byte_stream};
//!
//! let body = frames(&[json!({"A": 1}), json!({"B": 2})]);
//! let stream = byte_stream(split_every(body.as_bytes(), 3));
//! ```

pub mod mocks;

#[allow(unused_imports)]
pub use mocks::*;

use bytes::Bytes;
use futures::stream::{self, Stream};
use serde_json::{json, Value};

use virtuary::sse::{ReadSummary, StreamingRecordReader};
use virtuary::traits::HttpError;

/// Encode records the way the backend frames them.
pub fn frames(records: &[Value]) -> String {
    records
        .iter()
        .map(|r| format!("data: {}\n\n", r))
        .collect()
}

/// Split `body` into chunks of at most `size` bytes, ignoring UTF-8
/// boundaries.
pub fn split_every(body: &[u8], size: usize) -> Vec<Bytes> {
    body.chunks(size.max(1))
        .map(|c| Bytes::copy_from_slice(c))
        .collect()
}

/// Split `body` into two chunks at byte `at`.
pub fn split_at(body: &[u8], at: usize) -> Vec<Bytes> {
    let (head, tail) = body.split_at(at);
    vec![Bytes::copy_from_slice(head), Bytes::copy_from_slice(tail)]
}

/// A byte stream that yields `chunks` and then ends.
pub fn byte_stream(
    chunks: Vec<Bytes>,
) -> impl Stream<Item = Result<Bytes, HttpError>> + Unpin + Send {
    stream::iter(chunks.into_iter().map(Ok))
}

/// Run a fresh reader over `chunks`, collecting records.
#[allow(dead_code)]
pub async fn read_all(chunks: Vec<Bytes>) -> (Vec<Value>, ReadSummary) {
    let mut reader = StreamingRecordReader::new(None);
    reader.begin_request();
    let mut records: Vec<Value> = Vec::new();
    let summary = reader
        .read(byte_stream(chunks), &mut records)
        .await
        .expect("stream should complete");
    (records, summary)
}

/// Species records with multi-byte text in names and summaries.
#[allow(dead_code)]
pub fn species_fixture() -> Vec<Value> {
    vec![
        json!({"Bengal Tiger": {
            "images": ["https://example.org/tiger.jpg"],
            "wikipedia": "Panthera tigris tigris — the nominate subspecies.",
            "inaturalist": {"scientific_name": "Panthera tigris tigris", "observations_count": 586}
        }}),
        json!({"Great Hornbill (ಮಲೆ ಮಂಗಟ್ಟೆ)": {
            "images": [],
            "inaturalist": "No iNaturalist data found"
        }}),
        json!({"Lion-tailed Macaque 🐒": {
            "audio": [{
                "source": "Xeno-canto",
                "id": 585406,
                "url": "https://xeno-canto.org/585406"
            }],
            "inaturalist": {"observations_count": "N/A", "conservation_status": "N/A"}
        }}),
    ]
}
