//! Virtuary Explore - streaming species search client
//!
//! This library exposes modules for use by the binary and integration tests.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod cli_output;
pub mod client;
pub mod error;
pub mod models;
pub mod sse;
pub mod startup;
pub mod traits;
pub mod view_state;
