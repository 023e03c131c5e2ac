// logmask-core/src/engine.rs
//! Defines the core `SanitizationEngine` trait.
//!
//! Callers such as the CLI depend on this trait rather than on a concrete
//! engine. Sanitization is total: every method accepts any text, including
//! the empty string, and has no error channel.
//!
//! License: MIT OR APACHE 2.0

use crate::config::RedactionSummaryItem;
use crate::redaction_match::RedactionMatch;
use crate::sanitizers::compiler::RuleSet;

/// Core functionality of a sanitization engine.
///
/// Engines are `Send + Sync` and hold no per-call state, so a single instance
/// can serve any number of concurrent callers.
pub trait SanitizationEngine: Send + Sync {
    /// Returns `content` with every detected span masked.
    ///
    /// Text that matches no rule is returned unchanged.
    fn sanitize(&self, content: &str) -> String;

    /// Same output as [`sanitize`](Self::sanitize), plus a per-rule summary
    /// of what was masked, in rule order.
    fn sanitize_with_summary(&self, content: &str) -> (String, Vec<RedactionSummaryItem>);

    /// Returns the per-rule summary without keeping the sanitized text.
    ///
    /// Used by the `scan` command.
    fn analyze_for_stats(&self, content: &str) -> Vec<RedactionSummaryItem> {
        self.sanitize_with_summary(content).1
    }

    /// Every masked span, in the order the passes produced them.
    fn find_matches(&self, content: &str) -> Vec<RedactionMatch>;

    /// The compiled rules this engine applies.
    fn rule_set(&self) -> &RuleSet;
}
