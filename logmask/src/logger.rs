// logmask/src/logger.rs
//! Logger setup for the `logmask` binary.
//!
//! Logs always go to stderr so they never mix with masked text on stdout.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Picks the level implied by the global flags. `None` defers to `RUST_LOG`.
pub fn level_for(quiet: bool, debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}

/// Initialises `env_logger`. Safe to call more than once; later calls are
/// ignored.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.target(Target::Stderr).format_timestamp(None);
    let _ = builder.try_init();
}
