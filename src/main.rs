use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use virtuary::adapters::ReqwestHttpClient;
use virtuary::cli::{
    apply_overrides, parse_args, run_explore, run_sample, version_line, CliCommand, USAGE,
};
use virtuary::startup::ExploreConfig;
use virtuary::view_state::ViewStatus;

/// Environment variable holding the log filter; `RUST_LOG` is the fallback.
const LOG_ENV: &str = "VIRTUARY_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // Logs go to stderr so cards on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    init_tracing();

    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("{}", USAGE);
            return Ok(ExitCode::FAILURE);
        }
    };

    let args = match command {
        CliCommand::Version => {
            println!("{}", version_line());
            return Ok(ExitCode::SUCCESS);
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            return Ok(ExitCode::SUCCESS);
        }
        CliCommand::Sample { raw } => {
            let mut out = io::stdout().lock();
            run_sample(raw, &mut out)?;
            return Ok(ExitCode::SUCCESS);
        }
        CliCommand::Explore(args) => args,
    };

    let config = apply_overrides(ExploreConfig::from_env(), &args);
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e.user_message());
        return Ok(ExitCode::FAILURE);
    }

    let http = ReqwestHttpClient::with_connect_timeout(config.connect_timeout)?
        .with_read_timeout(config.read_timeout);

    let runtime = tokio::runtime::Runtime::new()?;
    let status = runtime.block_on(async {
        let interrupt = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("Could not listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        };
        let mut out = io::stdout().lock();
        run_explore(Arc::new(http), &config, &args, &mut out, interrupt).await
    })?;

    match status {
        ViewStatus::Error(message) => {
            if args.raw {
                eprintln!("Error: {}", message);
            }
            Ok(ExitCode::FAILURE)
        }
        _ => Ok(ExitCode::SUCCESS),
    }
}
