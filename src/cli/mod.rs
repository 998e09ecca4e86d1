//! Command-line interface.
//!
//! - Argument parsing ([`parse_args`])
//! - Version display
//! - The explore and sample commands
//!
//! # Usage
//!
//! ```ignore
//! use virtuary::cli::{parse_args, CliCommand};
//!
//! match parse_args(std::env::args())? {
//!     CliCommand::Explore(args) => { /* run_explore(...) */ }
//!     CliCommand::Sample { raw } => run_sample(raw, &mut std::io::stdout())?,
//!     CliCommand::Version => println!("{}", version_line()),
//!     CliCommand::Help => println!("{}", USAGE),
//! }
//! ```

pub mod args;
pub mod explore;
pub mod version;

pub use args::{parse_args, CliCommand, ExploreArgs, UsageError, USAGE};
pub use explore::{apply_overrides, run_explore, run_sample};
pub use version::{version_line, VERSION};
