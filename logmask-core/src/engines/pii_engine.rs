// logmask-core/src/engines/pii_engine.rs
//! A `SanitizationEngine` that runs the ordered PII rule set.
//!
//! Each rule is one full-text pass over the current text: every
//! non-overlapping match is replaced before the next rule looks at the
//! result. Whole-match rules come first, the anchored name rule last.
//! Because masks keep the code-point length of what they replace and consist
//! only of the mask character, later passes cannot re-match masked spans.
//!
//! License: MIT OR APACHE 2.0

use std::borrow::Cow;
use std::collections::HashSet;
use std::ops::Range;
use std::sync::Arc;

use log::trace;
use regex::Captures;

use crate::config::{RedactionConfig, RedactionSummaryItem};
use crate::engine::SanitizationEngine;
use crate::errors::LogmaskError;
use crate::redaction_match::{
    canonical_sample_hash, log_redaction_match_debug, log_rule_pass_debug, RedactionMatch,
};
use crate::sanitizers::compiler::{compile_rules, CompiledRule, RuleSet};

const MODULE_PATH: &str = "[logmask_core::pii_engine]";

#[derive(Debug, Clone)]
pub struct PiiEngine {
    rules: Arc<RuleSet>,
}

impl PiiEngine {
    /// Creates an engine over an already compiled, shared rule set.
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    /// Compiles the built-in rule set and wraps it in an engine.
    pub fn with_default_rules() -> Result<Self, LogmaskError> {
        Ok(Self::new(Arc::new(RuleSet::load_default()?)))
    }

    pub fn from_config(config: &RedactionConfig) -> Result<Self, LogmaskError> {
        Ok(Self::new(Arc::new(compile_rules(config)?)))
    }

    /// Shared handle to the rule set, for handing to other engines or threads.
    pub fn shared_rules(&self) -> Arc<RuleSet> {
        Arc::clone(&self.rules)
    }

    /// Runs every rule in order over `content`.
    ///
    /// `observe` is called once per masked span with the rule, the original
    /// text of the span and its code-point range.
    fn run_passes<F>(&self, content: &str, mut observe: F) -> String
    where
        F: FnMut(&CompiledRule, &str, Range<usize>),
    {
        let mask = self.rules.mask_char();
        let mut text = content.to_string();

        for rule in self.rules.rules() {
            let current: &str = &text;
            let mut byte_cursor = 0usize;
            let mut char_cursor = 0usize;
            let mut occurrences = 0usize;

            let replaced = rule.regex().replace_all(current, |caps: &Captures| {
                if let Some(span) = rule.masked_span(caps) {
                    // Matches arrive left to right, so the cursors only move forward.
                    char_cursor += current[byte_cursor..span.start()].chars().count();
                    let len = span.as_str().chars().count();
                    observe(rule, span.as_str(), char_cursor..char_cursor + len);
                    char_cursor += len;
                    byte_cursor = span.end();
                    occurrences += 1;
                }
                rule.replacement(caps, mask)
            });

            let next = match replaced {
                Cow::Borrowed(_) => None,
                Cow::Owned(s) => Some(s),
            };
            if occurrences > 0 {
                log_rule_pass_debug(MODULE_PATH, rule.name(), occurrences);
            } else {
                trace!("{} Rule '{}' found nothing.", MODULE_PATH, rule.name());
            }
            if let Some(next) = next {
                text = next;
            }
        }

        text
    }

    fn record(rule: &CompiledRule, original: &str, range: Range<usize>) -> RedactionMatch {
        let m = RedactionMatch {
            rule_name: rule.name().to_string(),
            category: rule.category().to_string(),
            start: range.start,
            end: range.end,
            sample_hash: canonical_sample_hash(rule.name(), original),
        };
        log_redaction_match_debug(MODULE_PATH, &m);
        m
    }

    fn summarize(&self, matches: &[RedactionMatch]) -> Vec<RedactionSummaryItem> {
        let mut summary = Vec::new();
        for rule in self.rules.rules() {
            let hits: Vec<&RedactionMatch> =
                matches.iter().filter(|m| m.rule_name == rule.name()).collect();
            if hits.is_empty() {
                continue;
            }
            let unique: HashSet<&str> = hits.iter().map(|m| m.sample_hash.as_str()).collect();
            summary.push(RedactionSummaryItem {
                rule_name: rule.name().to_string(),
                category: rule.category().to_string(),
                occurrences: hits.len(),
                unique_values: unique.len(),
            });
        }
        summary
    }
}

impl SanitizationEngine for PiiEngine {
    fn sanitize(&self, content: &str) -> String {
        self.run_passes(content, |_, _, _| {})
    }

    fn sanitize_with_summary(&self, content: &str) -> (String, Vec<RedactionSummaryItem>) {
        let mut matches = Vec::new();
        let sanitized = self.run_passes(content, |rule, original, range| {
            matches.push(Self::record(rule, original, range));
        });
        (sanitized, self.summarize(&matches))
    }

    fn find_matches(&self, content: &str) -> Vec<RedactionMatch> {
        let mut matches = Vec::new();
        self.run_passes(content, |rule, original, range| {
            matches.push(Self::record(rule, original, range));
        });
        matches
    }

    fn rule_set(&self) -> &RuleSet {
        &self.rules
    }
}
