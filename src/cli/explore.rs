//! The `virtuary <LOCATION>` command.

use std::future::Future;
use std::io::Write;
use std::sync::Arc;

use color_eyre::Result;

use super::args::ExploreArgs;
use crate::app::{ExploreMessage, ExploreSession};
use crate::cli_output::{write_card, write_footer, write_header, write_raw};
use crate::startup::ExploreConfig;
use crate::traits::HttpClient;
use crate::view_state::{ExploreViewController, ViewStatus};

/// Layer command-line overrides on top of `config`.
pub fn apply_overrides(mut config: ExploreConfig, args: &ExploreArgs) -> ExploreConfig {
    if let Some(url) = &args.url {
        config = config.with_base_url(url.clone());
    }
    if let Some(timeout) = args.timeout {
        config = config.with_read_timeout(timeout);
    }
    config
}

/// Run one search, printing each record as it arrives.
///
/// Resolving `interrupt` cancels the search; records already printed stay
/// printed. Returns the final view status.
pub async fn run_explore<W, F>(
    http: Arc<dyn HttpClient>,
    config: &ExploreConfig,
    args: &ExploreArgs,
    out: &mut W,
    interrupt: F,
) -> Result<ViewStatus>
where
    W: Write,
    F: Future<Output = ()>,
{
    let mut view = ExploreViewController::new();
    let ticket = view.begin_search(&args.location)?;
    let (mut session, mut rx) = ExploreSession::new(http, config);

    if !args.raw {
        write_header(out, &format!("EXPLORING: {}", ticket.location))?;
        out.flush()?;
    }
    session.search(&ticket);

    tokio::pin!(interrupt);
    while view.is_loading() {
        tokio::select! {
            message = rx.recv() => {
                let Some(message) = message else { break };
                let is_record = matches!(message, ExploreMessage::Record { .. });
                if view.apply(message) && is_record {
                    if let Some(record) = view.records().last() {
                        if args.raw {
                            write_raw(out, record)?;
                        } else {
                            write_card(out, view.len(), record)?;
                        }
                        out.flush()?;
                    }
                }
            }
            _ = &mut interrupt => {
                tracing::info!(generation = ticket.generation, "Search interrupted");
                session.cancel();
                view.cancel();
            }
        }
    }

    if !args.raw {
        write_footer(out, &view)?;
    }
    Ok(view.status())
}

/// Print the bundled sample species.
pub fn run_sample<W: Write>(raw: bool, out: &mut W) -> Result<()> {
    let mut view = ExploreViewController::new();
    view.load_sample_data();

    if !raw {
        write_header(out, "SAMPLE SPECIES")?;
    }
    for (i, record) in view.records().iter().enumerate() {
        if raw {
            write_raw(out, record)?;
        } else {
            write_card(out, i + 1, record)?;
        }
    }
    if !raw {
        write_footer(out, &view)?;
    }
    Ok(())
}
