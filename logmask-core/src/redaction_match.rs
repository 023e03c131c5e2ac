// logmask-core/src/redaction_match.rs
//! Records of individual masking events and PII-safe debug logging.
//!
//! A `RedactionMatch` never holds the text it masked. Positions are counted in
//! code points; because every replacement keeps the code-point length of what
//! it replaces, the same offsets are valid in the input and in the output.

use log::debug;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One masked span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionMatch {
    pub rule_name: String,
    pub category: String,
    /// Code-point offset of the first masked character.
    pub start: usize,
    /// Code-point offset one past the last masked character.
    pub end: usize,
    /// Fingerprint of the original span, see [`canonical_sample_hash`].
    pub sample_hash: String,
}

impl RedactionMatch {
    /// Number of code points masked.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

pub fn log_redaction_match_debug(module_path: &str, m: &RedactionMatch) {
    debug!(
        "{} Masked span: Rule='{}', Range={}..{} ({} chars)",
        module_path,
        m.rule_name,
        m.start,
        m.end,
        m.len()
    );
}

pub fn log_rule_pass_debug(module_path: &str, rule_name: &str, occurrences: usize) {
    debug!("{} Rule '{}' masked {} span(s).", module_path, rule_name, occurrences);
}

/// Stable SHA-256 fingerprint of a matched span, used to count distinct
/// values without retaining them.
pub fn canonical_sample_hash(rule_id: &str, snippet: &str) -> String {
    let normalized = snippet
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let mut hasher = Sha256::new();
    hasher.update(rule_id.as_bytes());
    hasher.update(b":");
    hasher.update(normalized.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_sample_hash_consistency() {
        let h1 = canonical_sample_hash("email", "User@Example.COM ");
        let h2 = canonical_sample_hash("email", "user@example.com");
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
    }

    #[test]
    fn test_canonical_sample_hash_is_rule_scoped() {
        assert_ne!(
            canonical_sample_hash("mobile_phone", "0912345678"),
            canonical_sample_hash("payment_card", "0912345678")
        );
    }
}
