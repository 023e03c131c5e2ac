// logmask/src/commands/scan.rs
//! `scan`: counts matches per rule without emitting the masked text.
//!
//! The report carries counts only. Unique-value counts come from digests, so
//! no matched text ever reaches the report.

use anyhow::{Context, Result};
use chrono::Utc;
use is_terminal::IsTerminal;
use log::{debug, info};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};

use logmask_core::{RedactionSummaryItem, SanitizationEngine};

use crate::cli::ScanCommand;
use crate::commands::sanitize::{info_msg, warn_msg};
use crate::commands::{read_input, source_label};
use crate::ui::redaction_summary;

/// JSON-serialisable scan result.
#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub generated_at: String,
    pub source: String,
    pub total_matches: usize,
    pub rules: Vec<RedactionSummaryItem>,
}

/// What `main` needs to pick the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOutcome {
    pub total_matches: usize,
    pub threshold_exceeded: bool,
}

pub fn build_report(engine: &dyn SanitizationEngine, content: &str, source: String) -> ScanReport {
    let rules = engine.analyze_for_stats(content);
    let total_matches = rules.iter().map(|r| r.occurrences).sum();
    ScanReport {
        generated_at: Utc::now().to_rfc3339(),
        source,
        total_matches,
        rules,
    }
}

pub fn run_scan(engine: &dyn SanitizationEngine, cmd: ScanCommand, quiet: bool) -> Result<ScanOutcome> {
    info!("Starting scan operation.");
    let input = read_input(cmd.input_file.as_deref())?;
    let report = build_report(engine, &input, source_label(cmd.input_file.as_deref()));
    debug!("Scan found {} match(es) across {} rule(s).", report.total_matches, report.rules.len());

    if cmd.json_stdout {
        let mut stdout = io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &report).context("Failed to serialize scan report")?;
        writeln!(stdout)?;
    } else {
        if let Some(path) = &cmd.json_file {
            let json = serde_json::to_string_pretty(&report).context("Failed to serialize scan report")?;
            fs::write(path, json)
                .with_context(|| format!("Failed to write scan report: {}", path.display()))?;
            if !quiet {
                info_msg(format!("Scan report written to {}", path.display()));
            }
        }
        if !quiet {
            let supports_color = io::stderr().is_terminal();
            redaction_summary::print_summary(&report.rules, &mut io::stderr(), supports_color)?;
        }
    }

    let threshold_exceeded = cmd
        .fail_over_threshold
        .is_some_and(|limit| report.total_matches > limit);
    if threshold_exceeded && !quiet {
        warn_msg(format!(
            "{} match(es) found, over the threshold of {}.",
            report.total_matches,
            cmd.fail_over_threshold.unwrap_or_default()
        ));
    }

    Ok(ScanOutcome {
        total_matches: report.total_matches,
        threshold_exceeded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use logmask_core::PiiEngine;

    #[test]
    fn test_report_totals_and_rule_order() {
        let engine = PiiEngine::with_default_rules().unwrap();
        let report = build_report(
            &engine,
            "a@example.com 0912345678 b@example.com",
            "<stdin>".to_string(),
        );
        assert_eq!(report.total_matches, 3);
        let names: Vec<_> = report.rules.iter().map(|r| r.rule_name.as_str()).collect();
        assert_eq!(names, vec!["email", "mobile_phone"]);
    }

    #[test]
    fn test_report_json_has_no_matched_text() {
        let engine = PiiEngine::with_default_rules().unwrap();
        let report = build_report(&engine, "ID: A123456789", "pod.log".to_string());
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"national_id\""));
        assert!(!json.contains("A123456789"));
    }
}
