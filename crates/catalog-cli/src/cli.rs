//! Argument definitions for the `catalog` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "catalog",
    version,
    about = "Map product spreadsheets onto the catalog schema",
    long_about = "Map columns of a product CSV onto the catalog target schema.\n\n\
                  Mapping, defaults, linked Google fields and parent articles are\n\
                  read from a TOML job file; the result can be previewed,\n\
                  validated and exported as CSV."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Replace the built-in target schema with a TOML file.
    #[arg(long = "schema", value_name = "FILE", global = true)]
    pub schema: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List target fields and linked Google fields.
    Fields,

    /// Show the columns of a file with fill counts and sample values.
    Inspect(FileArgs),

    /// Suggest column mappings for a file.
    Suggest(SuggestArgs),

    /// List manufacturer groups of a file.
    Groups(GroupsArgs),

    /// Validate mapped columns and report violations.
    Validate(ValidateArgs),

    /// Show the transformed rows.
    Preview(PreviewArgs),

    /// Write the transformed rows as CSV.
    Export(ExportArgs),

    /// Look up a GTIN through the product-data API.
    Scan(ScanArgs),

    /// Run the GTIN lookup proxy.
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct FileArgs {
    /// Product file (CSV, XLS or XLSX).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct JobFileArgs {
    /// Product file (CSV, XLS or XLSX).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Job file with mapping, defaults, linked values and parents.
    #[arg(long = "job", short = 'j', value_name = "JOB")]
    pub job: Option<PathBuf>,
}

#[derive(Args)]
pub struct SuggestArgs {
    #[command(flatten)]
    pub input: FileArgs,

    /// Minimum confidence for a suggestion (0.0 to 1.0).
    #[arg(long = "min-confidence", value_name = "SCORE")]
    pub min_confidence: Option<f32>,
}

#[derive(Args)]
pub struct GroupsArgs {
    #[command(flatten)]
    pub input: JobFileArgs,

    /// Source column holding the manufacturer id (default: the column
    /// mapped to the manufacturer field).
    #[arg(long = "column", value_name = "COLUMN")]
    pub column: Option<String>,
}

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: JobFileArgs,

    /// Exit with status 1 when any violation is found.
    #[arg(long = "fail-on-issues")]
    pub fail_on_issues: bool,
}

#[derive(Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub input: JobFileArgs,

    /// Maximum number of rows to show.
    #[arg(long = "limit", value_name = "N", default_value_t = 20)]
    pub limit: usize,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub input: JobFileArgs,

    /// Output file or directory; `-` writes to stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH", default_value = ".")]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct ScanArgs {
    /// GTIN to look up.
    #[arg(value_name = "GTIN")]
    pub gtin: String,

    #[command(flatten)]
    pub proxy: ProxyArgs,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on.
    #[arg(long = "bind", value_name = "ADDR")]
    pub bind: Option<String>,

    #[command(flatten)]
    pub proxy: ProxyArgs,
}

#[derive(Args)]
pub struct ProxyArgs {
    /// Job file whose `[proxy]` table configures the upstream API.
    #[arg(long = "job", short = 'j', value_name = "JOB")]
    pub job: Option<PathBuf>,

    /// Upstream lookup URL (overrides job file and environment).
    #[arg(long = "upstream", value_name = "URL")]
    pub upstream: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
