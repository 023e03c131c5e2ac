//! Rule definitions for `logmask-core`.
//!
//! The built-in rule set lives in `config/default_rules.yaml` and is embedded
//! into the binary at build time. There is no runtime configuration: no file,
//! environment variable or flag changes which rules run or in what order.
//! This module deserializes and validates that definition; compilation into
//! matchers happens in [`crate::sanitizers::compiler`].
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::masker::DEFAULT_MASK_CHAR;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

const DEFAULT_RULES_YAML: &str = include_str!("../config/default_rules.yaml");

/// How a rule turns a match into its replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplacementPolicy {
    /// The entire match is replaced by a mask of equal code-point length.
    #[default]
    WholeMatch,
    /// Capture group 1 is kept verbatim, capture group 2 is masked.
    AnchoredCapture,
}

impl fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReplacementPolicy::WholeMatch => write!(f, "whole_match"),
            ReplacementPolicy::AnchoredCapture => write!(f, "anchored_capture"),
        }
    }
}

/// A single redaction rule as declared in the rule definition file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RedactionRule {
    /// Unique identifier for the rule (e.g., "email").
    pub name: String,
    /// Human-readable description of what the rule targets.
    pub description: Option<String>,
    /// Kind of PII the rule targets (e.g., "contact", "address").
    pub category: String,
    /// The regex pattern string.
    pub pattern: Option<String>,
    /// Replacement policy applied to each match.
    pub policy: ReplacementPolicy,
}

impl Default for RedactionRule {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            category: "uncategorized".to_string(),
            pattern: None,
            policy: ReplacementPolicy::WholeMatch,
        }
    }
}

fn default_mask_char() -> char {
    DEFAULT_MASK_CHAR
}

/// The ordered rule definition. Order of `rules` is the application order.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RedactionConfig {
    /// Glyph written once per masked code point.
    #[serde(default = "default_mask_char")]
    pub mask_char: char,
    /// Rules in application order.
    #[serde(default)]
    pub rules: Vec<RedactionRule>,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            mask_char: DEFAULT_MASK_CHAR,
            rules: Vec::new(),
        }
    }
}

/// Per-rule tally of what a redaction run masked. Never carries matched text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionSummaryItem {
    pub rule_name: String,
    pub category: String,
    pub occurrences: usize,
    /// Number of distinct original values, counted by fingerprint.
    pub unique_values: usize,
}

impl RedactionConfig {
    /// Loads and validates the built-in rule set embedded at build time.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default rules from embedded string...");
        let config: RedactionConfig = serde_yml::from_str(DEFAULT_RULES_YAML)
            .context("Failed to parse default rules")?;

        validate_rules(&config.rules).context("Default rules failed validation")?;
        debug!("Loaded {} default rules.", config.rules.len());
        Ok(config)
    }

    /// Rule names in application order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name.as_str()).collect()
    }
}

/// Validates rule integrity: names, patterns, capture groups and ordering.
pub(crate) fn validate_rules(rules: &[RedactionRule]) -> Result<()> {
    let mut rule_names = HashSet::new();
    let mut errors = Vec::new();
    let mut seen_anchored = false;

    for rule in rules {
        if rule.name.is_empty() {
            errors.push("A rule has an empty `name` field.".to_string());
        } else if !rule_names.insert(rule.name.as_str()) {
            errors.push(format!("Duplicate rule name found: '{}'.", rule.name));
        }

        // Whole-match rules form one ordered block that runs before any
        // anchored-capture rule.
        match rule.policy {
            ReplacementPolicy::AnchoredCapture => seen_anchored = true,
            ReplacementPolicy::WholeMatch if seen_anchored => errors.push(format!(
                "Rule '{}': whole_match rules must precede all anchored_capture rules.",
                rule.name
            )),
            ReplacementPolicy::WholeMatch => {}
        }

        let pattern = match &rule.pattern {
            Some(p) if !p.is_empty() => p,
            Some(_) => {
                errors.push(format!("Rule '{}' has an empty `pattern` field.", rule.name));
                continue;
            }
            None => {
                errors.push(format!("Rule '{}' is missing the `pattern` field.", rule.name));
                continue;
            }
        };

        let regex = match Regex::new(pattern) {
            Ok(regex) => regex,
            Err(e) => {
                errors.push(format!("Rule '{}' has an invalid regex pattern: {}", rule.name, e));
                continue;
            }
        };

        // captures_len counts the implicit whole-match group 0.
        if rule.policy == ReplacementPolicy::AnchoredCapture && regex.captures_len() < 3 {
            errors.push(format!(
                "Rule '{}': anchored_capture needs capture groups 1 and 2, found {}.",
                rule.name,
                regex.captures_len() - 1
            ));
        }
    }

    if !errors.is_empty() {
        let full_error_message = format!("Rule validation failed:\n{}", errors.join("\n"));
        Err(anyhow!(full_error_message))
    } else {
        Ok(())
    }
}
