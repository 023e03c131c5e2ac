// logmask/src/ui/redaction_summary.rs
//! Renders the per-rule redaction summary as a table.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use logmask_core::RedactionSummaryItem;
use std::io::{self, Write};

pub fn build_summary_table(summary: &[RedactionSummaryItem], supports_color: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Rule", "Category", "Occurrences", "Unique"]);

    for item in summary {
        let rule = if supports_color {
            Cell::new(&item.rule_name).fg(Color::Yellow)
        } else {
            Cell::new(&item.rule_name)
        };
        table.add_row(vec![
            rule,
            Cell::new(&item.category),
            Cell::new(item.occurrences),
            Cell::new(item.unique_values),
        ]);
    }
    table
}

/// Writes the summary, or a one-line note when nothing was masked.
pub fn print_summary(
    summary: &[RedactionSummaryItem],
    writer: &mut dyn Write,
    supports_color: bool,
) -> io::Result<()> {
    if summary.is_empty() {
        return writeln!(writer, "No PII detected.");
    }
    let total: usize = summary.iter().map(|s| s.occurrences).sum();
    writeln!(writer, "Redaction summary ({} span(s) masked):", total)?;
    writeln!(writer, "{}", build_summary_table(summary, supports_color))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(rule: &str, occurrences: usize) -> RedactionSummaryItem {
        RedactionSummaryItem {
            rule_name: rule.to_string(),
            category: "contact".to_string(),
            occurrences,
            unique_values: 1,
        }
    }

    #[test]
    fn test_empty_summary() {
        let mut out = Vec::new();
        print_summary(&[], &mut out, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No PII detected.\n");
    }

    #[test]
    fn test_summary_lists_rules_and_total() {
        let mut out = Vec::new();
        print_summary(&[item("email", 2), item("mobile_phone", 1)], &mut out, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Redaction summary (3 span(s) masked):"));
        assert!(text.contains("email"));
        assert!(text.contains("mobile_phone"));
    }
}
