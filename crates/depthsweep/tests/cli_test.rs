//! Command-line parsing and logging settings.

use clap::{CommandFactory, Parser};
use depthsweep::LoggingConfig;
use depthsweep::cli::Cli;
use std::path::PathBuf;

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_no_arguments_runs_with_defaults() {
    let cli = Cli::try_parse_from(["depthsweep"]).unwrap();
    assert!(cli.config.is_none());
    assert!(!cli.verbose);
    assert!(!cli.json_logs);

    let logging = LoggingConfig::from_cli(&cli);
    assert_eq!(logging.log_level, "info");
    assert!(!logging.json_logs);
}

#[test]
fn test_flags() {
    let cli = Cli::try_parse_from(["depthsweep", "--config", "sweep.toml", "-v", "--json-logs"])
        .unwrap();
    assert_eq!(cli.config, Some(PathBuf::from("sweep.toml")));

    let logging = LoggingConfig::from_cli(&cli);
    assert_eq!(logging.log_level, "debug");
    assert!(logging.json_logs);
    assert_eq!(logging.service_name, "depthsweep");
}

#[test]
fn test_rejects_subcommands() {
    assert!(Cli::try_parse_from(["depthsweep", "run"]).is_err());
}
