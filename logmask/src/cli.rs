// logmask/src/cli.rs
//! Command-line interface definition for `logmask`.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "logmask",
    version = env!("CARGO_PKG_VERSION"),
    about = "Mask PII in log output",
    long_about = "logmask masks personally identifiable information in pod and container logs: identity numbers, email addresses, phone numbers, address unit numbers, card numbers, bearer tokens, JWTs and keyword-introduced CJK names. Everything else, including CJK text, is passed through unchanged. Pipe `kubectl logs` into it or point it at a file.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Suppress informational messages and the redaction summary.
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG).
    #[arg(long, short = 'd', global = true, env = "LOGMASK_DEBUG", help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `logmask` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Masks PII in an input file or stdin and writes the result.
    #[command(about = "Masks PII in an input file or stdin and writes the result.")]
    Sanitize(SanitizeCommand),

    /// Counts PII matches per rule without writing the masked text.
    #[command(about = "Counts PII matches per rule without writing the masked text.")]
    Scan(ScanCommand),

    /// Lists the built-in rules in the order they are applied.
    #[command(about = "Lists the built-in rules in the order they are applied.")]
    Rules(RulesCommand),
}

/// Arguments for the `sanitize` command.
#[derive(Parser, Debug)]
pub struct SanitizeCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Write sanitized output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Show a unified diff to highlight the changes made.
    #[arg(long, short = 'D', conflicts_with = "line_buffered", help = "Show a unified diff to highlight the changes made.")]
    pub diff: bool,

    /// Process input line by line (for followed log streams).
    #[arg(long = "line-buffered", help = "Process input line by line, flushing after each line.")]
    pub line_buffered: bool,

    /// Suppress the redaction summary.
    #[arg(long = "no-redaction-summary", help = "Suppress the redaction summary.")]
    pub no_summary: bool,
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Exit with a non-zero code if the total number of matches exceeds this threshold.
    #[arg(long = "fail-over-threshold", value_name = "N", help = "Exit with status 1 if the total number of matches exceeds N.")]
    pub fail_over_threshold: Option<usize>,

    /// Export the scan report to a JSON file.
    #[arg(long = "json-file", value_name = "FILE", help = "Export the scan report to a JSON file.")]
    pub json_file: Option<PathBuf>,

    /// Print the scan report as JSON to stdout.
    #[arg(long = "json-stdout", conflicts_with = "json_file", help = "Print the scan report to stdout as JSON.")]
    pub json_stdout: bool,
}

/// Arguments for the `rules` command.
#[derive(Parser, Debug)]
pub struct RulesCommand {
    /// Print the rule list as JSON instead of a table.
    #[arg(long, help = "Print the rule list as JSON instead of a table.")]
    pub json: bool,
}
