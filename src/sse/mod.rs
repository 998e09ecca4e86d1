//! Incremental parsing of the explore stream.
//!
//! The backend answers a search with a chunked body in a server-sent-events
//! style framing:
//! - Frames are separated by a blank line (`"\n\n"`)
//! - A meaningful frame starts with `data:` followed by one JSON document
//! - Any other frame (comments, keep-alives) is ignored
//!
//! # Module structure
//! - `decoder` - UTF-8 decoding that survives characters split across chunks
//! - `events` - Frame outcomes and the per-frame parse error
//! - `parser` - Synchronous frame splitting (`RecordParser`, `classify_frame`)
//! - `reader` - Async driver over a byte stream (`StreamingRecordReader`)

mod decoder;
mod events;
mod parser;
mod reader;

pub use decoder::Utf8StreamDecoder;
pub use events::{FrameOutcome, FrameParseError};
pub use parser::{classify_frame, RecordParser, DATA_MARKER, FRAME_DELIMITER};
pub use reader::{ReadSummary, ReaderState, StreamingRecordReader};
