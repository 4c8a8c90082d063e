//! Tests for serve and run subcommands.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_serve_default_bind() {
    match parse(&["sitecheck", "serve"]) {
        CliCommand::Serve { bind } => assert!(bind.is_none()),
        _ => panic!("expected Serve"),
    }
}

#[test]
fn cli_parse_serve_bind() {
    match parse(&["sitecheck", "serve", "--bind", "0.0.0.0:8080"]) {
        CliCommand::Serve { bind } => assert_eq!(bind.as_deref(), Some("0.0.0.0:8080")),
        _ => panic!("expected Serve with --bind"),
    }
}

#[test]
fn cli_parse_run() {
    assert!(matches!(parse(&["sitecheck", "run"]), CliCommand::Run));
}

#[test]
fn cli_rejects_unknown_command() {
    assert!(Cli::try_parse_from(["sitecheck", "sync-all"]).is_err());
}

#[test]
fn cli_requires_a_command() {
    assert!(Cli::try_parse_from(["sitecheck"]).is_err());
}
