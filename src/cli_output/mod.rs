//! Line-based terminal output for search results.
//!
//! Cards go to stdout; logs go to stderr and never interleave with them.

mod cards;

pub use cards::*;
