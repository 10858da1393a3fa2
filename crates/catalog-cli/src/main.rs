//! Catalog mapper CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use catalog_cli::logging::{LogConfig, LogFormat, init_logging};

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let result = commands::load_schema(cli.schema.as_deref()).and_then(|schema| {
        match &cli.command {
            Command::Fields => commands::run_fields(&schema).map(|()| 0),
            Command::Inspect(args) => commands::run_inspect(schema, args).map(|()| 0),
            Command::Suggest(args) => commands::run_suggest(schema, args).map(|()| 0),
            Command::Groups(args) => commands::run_groups(schema, args).map(|()| 0),
            Command::Validate(args) => commands::run_validate(schema, args).map(|clean| {
                if clean || !args.fail_on_issues { 0 } else { 1 }
            }),
            Command::Preview(args) => commands::run_preview(schema, args).map(|()| 0),
            Command::Export(args) => commands::run_export(schema, args).map(|()| 0),
            Command::Scan(args) => commands::run_scan(args).map(|()| 0),
            Command::Serve(args) => commands::run_serve(args).map(|()| 0),
        }
    });
    let exit_code = match result {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// `--log-level` beats `-v/-q`; `RUST_LOG` only applies when neither is given.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
