//! CLI for sitecheck.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sitecheck_core::config;

use commands::{run_check, run_serve, run_sync};

/// Top-level CLI for sitecheck.
#[derive(Debug, Parser)]
#[command(name = "sitecheck")]
#[command(about = "sitecheck: classify the websites listed in a spreadsheet", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Serve `POST /check-websites` until SIGINT/SIGTERM.
    Serve {
        /// Listen address (overrides `bind_addr` from the config file).
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },

    /// Run one synchronization of the configured spreadsheet and print a summary.
    Run,

    /// Classify URLs without touching the spreadsheet.
    Check {
        /// One or more URLs; a missing scheme means http://.
        #[arg(required = true)]
        urls: Vec<String>,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Serve { bind } => run_serve(&cfg, bind.as_deref()).await?,
            CliCommand::Run => run_sync(&cfg).await?,
            CliCommand::Check { urls } => run_check(urls, cfg.classify_concurrency).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
