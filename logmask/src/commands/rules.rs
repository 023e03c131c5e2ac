// logmask/src/commands/rules.rs
//! `rules`: lists the built-in rules in application order.

use anyhow::{Context, Result};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::io::{self, Write};

use logmask_core::{RuleDescriptor, SanitizationEngine};

use crate::cli::RulesCommand;

pub fn build_rules_table(descriptors: &[RuleDescriptor]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Rule", "Category", "Policy"]);
    for d in descriptors {
        table.add_row(vec![
            d.order.to_string(),
            d.name.clone(),
            d.category.clone(),
            d.policy.to_string(),
        ]);
    }
    table
}

pub fn run_rules(engine: &dyn SanitizationEngine, cmd: RulesCommand) -> Result<()> {
    let descriptors = engine.rule_set().descriptors();
    let mut stdout = io::stdout().lock();
    if cmd.json {
        serde_json::to_writer_pretty(&mut stdout, &descriptors).context("Failed to serialize rule list")?;
        writeln!(stdout)?;
    } else {
        writeln!(stdout, "{}", build_rules_table(&descriptors))?;
    }
    Ok(())
}
