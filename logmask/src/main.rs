// logmask/src/main.rs
//! logmask entry point.
//!
//! Parses arguments, sets up logging, compiles the built-in rule set once and
//! dispatches to the selected command.

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;

use logmask::cli::{Cli, Commands};
use logmask::commands::{rules, sanitize, scan};
use logmask::logger;
use logmask_core::PiiEngine;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            sanitize::error_msg(format!("{:#}", err));
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = Cli::parse();
    logger::init_logger(logger::level_for(args.quiet, args.debug));

    let engine = PiiEngine::with_default_rules().context("Failed to compile built-in redaction rules")?;
    log::debug!("Loaded {} redaction rules.", engine.shared_rules().len());

    match args.command {
        Commands::Sanitize(cmd) => {
            sanitize::run_sanitize(&engine, cmd, args.quiet)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Scan(cmd) => {
            let outcome = scan::run_scan(&engine, cmd, args.quiet)?;
            Ok(if outcome.threshold_exceeded {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Commands::Rules(cmd) => {
            rules::run_rules(&engine, cmd)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
