//! `rewrite-map` binary.
//!
//! ```text
//!   front-end ──stdin──▶ Session ──▶ Resolver ──▶ RuleSetCache ──▶ RuleSetManager ──▶ Checker
//!             ◀─stdout── FOUND / NULL                                  │
//!                                                                      └─ stat + reload per line
//!   diagnostics ──stderr──▶ tracing
//! ```

use clap::Parser;
use tokio::io::{self, BufReader};

use rewrite_map::cli::Cli;
use rewrite_map::config::check_config;
use rewrite_map::lifecycle::{build_resolver, shutdown_signal, ExecutableIdentity, StartupError};
use rewrite_map::observability::logging;
use rewrite_map::Session;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config().map_err(StartupError::from)?;

    logging::init(&config.logging);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "rewrite-map starting");

    check_config(&config).map_err(StartupError::from)?;

    let resolver = build_resolver(&config, ExecutableIdentity::current)?;
    let session = Session::new(resolver, config.protocol.max_line_bytes);

    let stdin = BufReader::new(io::stdin());
    let stdout = io::stdout();

    tokio::select! {
        result = session.run(stdin, stdout) => {
            result?;
        }
        _ = shutdown_signal() => {
            tracing::info!("Shutdown signal received");
            // The blocking stdin reader would otherwise hold the runtime open.
            std::process::exit(0);
        }
    }

    Ok(())
}
