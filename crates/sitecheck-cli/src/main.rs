use sitecheck_core::logging;

mod cli;
mod server;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    if let Err(e) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("log file unavailable, logging to stderr: {e:#}");
    }

    if let Err(err) = CliCommand::run_from_args().await {
        tracing::error!("{err:#}");
        eprintln!("sitecheck error: {:#}", err);
        std::process::exit(1);
    }
}
