//! Explore application flow.
//!
//! - [`ExploreSession`] runs searches on background tasks
//! - [`ExploreMessage`] carries their results to the view controller

mod messages;
mod session;

pub use messages::ExploreMessage;
pub use session::ExploreSession;
