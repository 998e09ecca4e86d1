//! View state for the explore screen.
//!
//! The controller is plain data plus transitions; rendering reads from it and
//! never mutates it.

mod explore_view;

pub use explore_view::{ExploreViewController, SearchTicket, ViewStatus};
