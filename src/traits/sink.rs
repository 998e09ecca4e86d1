//! Record sink abstraction.
//!
//! The streaming reader hands every parsed record to a sink, in the order the
//! frames completed.

use serde_json::Value;

use crate::sse::FrameParseError;

/// Receiver for records produced by [`crate::sse::StreamingRecordReader`].
pub trait RecordSink {
    /// Called once per successfully parsed data frame.
    fn on_record(&mut self, record: Value);

    /// Called once per data frame whose payload was not valid JSON.
    ///
    /// Processing continues after this returns.
    fn on_parse_error(&mut self, error: &FrameParseError) {
        tracing::warn!(payload = %error.payload, "Dropping data frame: {}", error.message);
    }
}

impl RecordSink for Vec<Value> {
    fn on_record(&mut self, record: Value) {
        self.push(record);
    }
}

/// Adapts a closure into a [`RecordSink`].
///
/// Parse errors use the default logging behaviour.
pub struct FnSink<F>(pub F);

impl<F> RecordSink for FnSink<F>
where
    F: FnMut(Value),
{
    fn on_record(&mut self, record: Value) {
        (self.0)(record)
    }
}
