//! Error handling for Virtuary.
//!
//! - **Error Categories**: high-level classification for retry and messaging
//! - **StreamError**: terminal failures of an explore stream
//! - **ExploreError**: unified error type with `ExploreResult<T>`
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, timeout, dropped stream | Yes |
//! | Server | Backend errors (5xx) | Yes |
//! | Client | Unexpected payloads, invalid state | No |
//! | User | Empty or unknown location | No |
//! | Configuration | Bad environment or flags | No |

mod category;
mod explore_error;
mod stream;

pub use category::ErrorCategory;
pub use explore_error::{ExploreError, ExploreResult};
pub use stream::StreamError;
