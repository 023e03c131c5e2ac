// logmask/src/commands/mod.rs
//! Command implementations for the `logmask` binary.

pub mod rules;
pub mod sanitize;
pub mod scan;

use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Reads the whole input from `path`, or from stdin when no path is given.
///
/// Log streams are not guaranteed to be UTF-8, so bytes are read raw and
/// decoded with [`decode_lossy`] instead of failing the run.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    let bytes = match path {
        Some(path) => fs::read(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))?,
        None => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .context("Failed to read from stdin")?;
            buffer
        }
    };
    Ok(decode_lossy(bytes))
}

/// Decodes `bytes` as UTF-8, replacing each invalid sequence with U+FFFD.
/// Valid input is returned without copying.
pub fn decode_lossy(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            let offset = err.utf8_error().valid_up_to();
            warn!(
                "Input is not valid UTF-8 (first invalid byte at offset {}); invalid sequences are replaced with U+FFFD.",
                offset
            );
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    }
}

/// Human-readable name of the input source.
pub fn source_label(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "<stdin>".to_string())
}
