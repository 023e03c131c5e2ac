// logmask/src/ui/output_format.rs
//! Prefixed status messages for stderr.

use owo_colors::OwoColorize;
use std::io::{self, Write};

fn print_prefixed(
    writer: &mut dyn Write,
    prefix: &str,
    message: &str,
    colorize: fn(&str) -> String,
    supports_color: bool,
) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", colorize(prefix), message)
    } else {
        writeln!(writer, "{} {}", prefix, message)
    }
}

pub fn print_info_message(writer: &mut dyn Write, message: &str, supports_color: bool) -> io::Result<()> {
    print_prefixed(writer, "[logmask]", message, |s: &str| s.cyan().to_string(), supports_color)
}

pub fn print_warn_message(writer: &mut dyn Write, message: &str, supports_color: bool) -> io::Result<()> {
    print_prefixed(writer, "[logmask WARN]", message, |s: &str| s.yellow().bold().to_string(), supports_color)
}

pub fn print_error_message(writer: &mut dyn Write, message: &str, supports_color: bool) -> io::Result<()> {
    print_prefixed(writer, "[logmask ERROR]", message, |s: &str| s.red().bold().to_string(), supports_color)
}
