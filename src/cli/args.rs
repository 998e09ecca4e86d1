//! Command-line argument parsing for the virtuary CLI.

use std::time::Duration;

use thiserror::Error;

use crate::startup::parse_timeout_secs;

/// Options for a location search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExploreArgs {
    /// Location words joined with single spaces
    pub location: String,
    /// `--url` override
    pub url: Option<String>,
    /// `--timeout` override; `Some(None)` disables the read timeout
    pub timeout: Option<Option<Duration>>,
    /// Print JSON lines instead of cards
    pub raw: bool,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Search a location
    Explore(ExploreArgs),
    /// Print the bundled sample species
    Sample { raw: bool },
    /// Show version information
    Version,
    /// Show usage
    Help,
}

/// Bad command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("missing value for {0}")]
    MissingValue(&'static str),
    #[error("invalid timeout '{0}': expected whole seconds")]
    InvalidTimeout(String),
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("no location given")]
    MissingLocation,
}

pub const USAGE: &str = "\
Usage: virtuary [OPTIONS] <LOCATION...>

Search a location for the species recorded there.

Options:
  --url <BASE_URL>   backend base URL (default http://localhost:5000)
  --timeout <SECS>   per-chunk read timeout, 0 disables (default 30)
  --sample           print the bundled sample species, no request
  --raw              print records as JSON lines instead of cards
  -V, --version      print version
  -h, --help         print this help";

/// Parse command-line arguments (including the program name).
///
/// # Examples
///
/// ```
/// use virtuary::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["virtuary".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, UsageError>
where
    I: Iterator<Item = String>,
{
    let mut explore = ExploreArgs::default();
    let mut words: Vec<String> = Vec::new();
    let mut sample = false;
    let mut only_positional = false;

    // Skip the program name
    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        if only_positional {
            words.push(arg);
            continue;
        }
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--sample" => sample = true,
            "--raw" => explore.raw = true,
            "--url" => {
                explore.url = Some(args.next().ok_or(UsageError::MissingValue("--url"))?);
            }
            "--timeout" => {
                let value = args.next().ok_or(UsageError::MissingValue("--timeout"))?;
                explore.timeout = Some(
                    parse_timeout_secs(&value).ok_or(UsageError::InvalidTimeout(value))?,
                );
            }
            "--" => only_positional = true,
            other if other.starts_with('-') && other.len() > 1 => {
                return Err(UsageError::UnknownOption(other.to_string()));
            }
            _ => words.push(arg),
        }
    }

    if sample {
        return Ok(CliCommand::Sample { raw: explore.raw });
    }

    explore.location = words
        .iter()
        .map(|w| w.trim())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if explore.location.is_empty() {
        return Err(UsageError::MissingLocation);
    }
    Ok(CliCommand::Explore(explore))
}
