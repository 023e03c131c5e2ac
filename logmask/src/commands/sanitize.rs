// logmask/src/commands/sanitize.rs
//! `sanitize`: writes the masked text, optionally as a diff, and prints a
//! redaction summary to stderr.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use logmask_core::{RedactionSummaryItem, SanitizationEngine};

use crate::cli::SanitizeCommand;
use crate::commands::read_input;
use crate::ui::{diff_viewer, output_format, redaction_summary};

/// Options for a buffered `sanitize` run.
pub struct SanitizeOptions {
    pub input: String,
    pub diff: bool,
    pub output_path: Option<PathBuf>,
    pub no_redaction_summary: bool,
    pub quiet: bool,
}

/// Prints an info message to stderr.
pub fn info_msg(msg: impl AsRef<str>) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), supports_color);
}

/// Prints an error message to stderr.
pub fn error_msg(msg: impl AsRef<str>) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), supports_color);
}

/// Prints a warning message to stderr.
pub fn warn_msg(msg: impl AsRef<str>) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), supports_color);
}

/// Entry point from `main`: picks streaming or buffered mode.
pub fn run_sanitize(engine: &dyn SanitizationEngine, cmd: SanitizeCommand, quiet: bool) -> Result<()> {
    if cmd.line_buffered {
        return run_line_buffered_command(engine, &cmd);
    }
    let input = read_input(cmd.input_file.as_deref())?;
    run_sanitize_opts(
        engine,
        SanitizeOptions {
            input,
            diff: cmd.diff,
            output_path: cmd.output,
            no_redaction_summary: cmd.no_summary,
            quiet,
        },
    )
}

/// Masks `opts.input` and writes the result.
pub fn run_sanitize_opts(engine: &dyn SanitizationEngine, opts: SanitizeOptions) -> Result<()> {
    info!("Starting sanitize operation.");

    let (sanitized_content, summary) = engine.sanitize_with_summary(&opts.input);

    debug!(
        "Content sanitized. Input: {} chars, {} rule(s) fired.",
        opts.input.chars().count(),
        summary.len()
    );

    handle_primary_output(&opts, &sanitized_content)?;
    handle_redaction_summary(&summary, &opts)?;

    info!("Sanitize operation completed.");
    Ok(())
}

fn handle_primary_output(opts: &SanitizeOptions, sanitized_content: &str) -> Result<()> {
    if let Some(path) = &opts.output_path {
        if !opts.quiet {
            info_msg(format!("Writing sanitized content to file: {}", path.display()));
        }
        let mut file = fs::File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        if opts.diff {
            diff_viewer::print_diff(&opts.input, sanitized_content, &mut file, false)?;
        } else {
            write!(file, "{}", sanitized_content)?;
        }
    } else {
        let stdout = io::stdout();
        let supports_color = stdout.is_terminal();
        let mut writer = stdout.lock();
        if opts.diff {
            diff_viewer::print_diff(&opts.input, sanitized_content, &mut writer, supports_color)?;
        } else {
            write!(writer, "{}", sanitized_content)?;
        }
        writer.flush()?;
    }
    Ok(())
}

fn handle_redaction_summary(summary: &[RedactionSummaryItem], opts: &SanitizeOptions) -> Result<()> {
    if !opts.no_redaction_summary && !opts.quiet {
        let supports_color = io::stderr().is_terminal();
        redaction_summary::print_summary(summary, &mut io::stderr(), supports_color)?;
    }
    Ok(())
}

/// Masks a single line.
pub fn sanitize_single_line(line: &str, engine: &dyn SanitizationEngine) -> String {
    engine.sanitize(line)
}

fn run_line_buffered_command(engine: &dyn SanitizationEngine, cmd: &SanitizeCommand) -> Result<()> {
    let reader: Box<dyn BufRead> = match &cmd.input_file {
        Some(path) => Box::new(io::BufReader::new(
            fs::File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    match &cmd.output {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            run_line_buffered(engine, reader, io::BufWriter::new(file))
        }
        None => run_line_buffered(engine, reader, io::stdout().lock()),
    }
}

/// Masks `reader` line by line, flushing after each line so followed log
/// streams appear promptly. Line endings are preserved as read.
pub fn run_line_buffered<R: BufRead, W: Write>(
    engine: &dyn SanitizationEngine,
    mut reader: R,
    mut writer: W,
) -> Result<()> {
    let mut raw = Vec::new();
    let mut lines = 0usize;
    loop {
        raw.clear();
        let read = reader
            .read_until(b'\n', &mut raw)
            .context("Failed to read input line")?;
        if read == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&raw);
        let (body, ending) = split_line_ending(&line);
        let masked = sanitize_single_line(body, engine);
        match writer
            .write_all(masked.as_bytes())
            .and_then(|_| writer.write_all(ending.as_bytes()))
            .and_then(|_| writer.flush())
        {
            Ok(()) => lines += 1,
            // Downstream closed (e.g. `| head`): stop quietly.
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => break,
            Err(e) => return Err(e).context("Failed to write sanitized line"),
        }
    }
    debug!("Line-buffered mode processed {} line(s).", lines);
    Ok(())
}

fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logmask_core::PiiEngine;
    use std::io::Cursor;
    use test_log::test;

    #[test]
    fn test_line_buffered_preserves_endings() {
        let engine = PiiEngine::with_default_rules().unwrap();
        let input = "Phone: 0912345678\r\nok\nlast 姓名：歐美";
        let mut out = Vec::new();
        run_line_buffered(&engine, Cursor::new(input), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Phone: **********\r\nok\nlast 姓名：**"
        );
    }

    #[test]
    fn test_line_buffered_continues_past_invalid_utf8() {
        let engine = PiiEngine::with_default_rules().unwrap();
        let input: &[u8] = b"Phone: 0912345678\nbad \xff byte\nEmail: user@example.com\n";
        let mut out = Vec::new();
        run_line_buffered(&engine, Cursor::new(input), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("Phone: **********\nbad {} byte\nEmail: {}\n", '\u{FFFD}', "*".repeat(16))
        );
    }

    #[test]
    fn test_split_line_ending() {
        assert_eq!(split_line_ending("a\r\n"), ("a", "\r\n"));
        assert_eq!(split_line_ending("a\n"), ("a", "\n"));
        assert_eq!(split_line_ending("a"), ("a", ""));
    }

    #[test]
    fn test_sanitize_opts_writes_file_without_trailing_newline() {
        let engine = PiiEngine::with_default_rules().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");
        run_sanitize_opts(
            &engine,
            SanitizeOptions {
                input: "mail a@example.com".to_string(),
                diff: false,
                output_path: Some(path.clone()),
                no_redaction_summary: true,
                quiet: true,
            },
        )
        .unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "mail *************");
    }
}
