// logmask/src/lib.rs
//! # logmask CLI
//!
//! Terminal front end for `logmask-core`: masks PII in log text read from a
//! file or stdin, reports per-rule counts, and lists the built-in rules.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
