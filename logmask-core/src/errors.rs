//! errors.rs - Custom error types for the logmask-core library.
//!
//! Redaction itself never fails. These errors only describe a rule set that
//! cannot be loaded or compiled, so they surface once, at startup.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All error types produced by the `logmask-core` library.
///
/// Marked `#[non_exhaustive]` so new variants are not a breaking change.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LogmaskError {
    #[error("Failed to compile redaction rule '{0}': {1}")]
    RuleCompilationError(String, regex::Error),

    #[error("Rule '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Rule '{0}': anchored capture pattern must define capture groups 1 (prefix) and 2 (payload), found {1} group(s)")]
    MissingCaptureGroup(String, usize),

    #[error("Rule '{0}' matches a run of the mask character '{1}'; masked output would be re-matched")]
    MaskCollision(String, char),

    #[error("Invalid rule definition: {0}")]
    InvalidRuleDefinition(String),

    /// The rule definition could not be parsed or failed validation.
    #[error("Failed to load redaction rules: {0:#}")]
    RuleLoadError(#[from] anyhow::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_failure_keeps_context_chain() {
        let err: LogmaskError = anyhow::anyhow!("duplicate rule name 'email'")
            .context("Invalid default rules")
            .into();
        assert!(matches!(err, LogmaskError::RuleLoadError(_)));
        assert_eq!(
            err.to_string(),
            "Failed to load redaction rules: Invalid default rules: duplicate rule name 'email'"
        );
    }
}
