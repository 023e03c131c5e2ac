//! compiler.rs - Turns the declared rule definition into a compiled `RuleSet`.
//!
//! A `RuleSet` is built once at startup and is read-only afterwards. It is
//! shared between callers through an `Arc`; there is no global cache and no
//! interior mutability, so any number of threads can redact concurrently.
//!
//! Compilation also checks the property every sequential pass depends on: a
//! run of the mask character must not be matched by any rule, otherwise a
//! later pass could re-match text an earlier pass already masked.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{Captures, Match, Regex, RegexBuilder};
use serde::Serialize;

use crate::config::{RedactionConfig, RedactionRule, ReplacementPolicy, MAX_PATTERN_LENGTH};
use crate::errors::LogmaskError;
use crate::masker::mask_runes;

/// Length of the mask-character run every rule is tested against.
const MASK_PROBE_LEN: usize = 64;

/// Compiled regex size limit (10 MB).
const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// A rule whose entire match is replaced by an equal-length mask.
#[derive(Debug)]
pub struct WholeMatchRule {
    pub name: String,
    pub category: String,
    pub regex: Regex,
}

impl WholeMatchRule {
    fn replacement(&self, caps: &Captures, mask: char) -> String {
        mask_runes(&caps[0], mask)
    }
}

/// A rule that keeps capture group 1 (the anchor) verbatim and masks capture
/// group 2. A match without both groups is masked entirely.
#[derive(Debug)]
pub struct AnchoredCaptureRule {
    pub name: String,
    pub category: String,
    pub regex: Regex,
}

impl AnchoredCaptureRule {
    fn replacement(&self, caps: &Captures, mask: char) -> String {
        match (caps.get(0), caps.get(1), caps.get(2)) {
            (Some(whole), Some(_), Some(payload)) => {
                // Everything in the match outside group 2 is kept verbatim.
                let text = whole.as_str();
                let head = payload.start() - whole.start();
                let tail = payload.end() - whole.start();
                let mut out = String::with_capacity(text.len());
                out.push_str(&text[..head]);
                out.push_str(&mask_runes(payload.as_str(), mask));
                out.push_str(&text[tail..]);
                out
            }
            // Cannot split the match: mask all of it.
            _ => mask_runes(&caps[0], mask),
        }
    }

    fn masked_span<'h>(&self, caps: &Captures<'h>) -> Option<Match<'h>> {
        match (caps.get(1), caps.get(2)) {
            (Some(_), Some(payload)) => Some(payload),
            _ => caps.get(0),
        }
    }
}

/// One compiled rule. The set of variants is closed: every rule either masks
/// its whole match or masks one capture after a preserved prefix.
#[derive(Debug)]
pub enum CompiledRule {
    WholeMatch(WholeMatchRule),
    AnchoredCapture(AnchoredCaptureRule),
}

impl CompiledRule {
    pub fn name(&self) -> &str {
        match self {
            CompiledRule::WholeMatch(r) => &r.name,
            CompiledRule::AnchoredCapture(r) => &r.name,
        }
    }

    pub fn category(&self) -> &str {
        match self {
            CompiledRule::WholeMatch(r) => &r.category,
            CompiledRule::AnchoredCapture(r) => &r.category,
        }
    }

    pub fn regex(&self) -> &Regex {
        match self {
            CompiledRule::WholeMatch(r) => &r.regex,
            CompiledRule::AnchoredCapture(r) => &r.regex,
        }
    }

    pub fn policy(&self) -> ReplacementPolicy {
        match self {
            CompiledRule::WholeMatch(_) => ReplacementPolicy::WholeMatch,
            CompiledRule::AnchoredCapture(_) => ReplacementPolicy::AnchoredCapture,
        }
    }

    /// Replacement text for one match. Always has the same code-point length
    /// as the match.
    pub fn replacement(&self, caps: &Captures, mask: char) -> String {
        match self {
            CompiledRule::WholeMatch(r) => r.replacement(caps, mask),
            CompiledRule::AnchoredCapture(r) => r.replacement(caps, mask),
        }
    }

    /// The part of a match that gets masked.
    pub fn masked_span<'h>(&self, caps: &Captures<'h>) -> Option<Match<'h>> {
        match self {
            CompiledRule::WholeMatch(_) => caps.get(0),
            CompiledRule::AnchoredCapture(r) => r.masked_span(caps),
        }
    }
}

/// Display-friendly description of a compiled rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleDescriptor {
    /// 1-based application order.
    pub order: usize,
    pub name: String,
    pub category: String,
    pub policy: ReplacementPolicy,
}

/// The ordered, immutable set of compiled rules plus the mask character.
#[derive(Debug)]
pub struct RuleSet {
    mask_char: char,
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Loads and compiles the built-in rule set. A definition that fails
    /// validation surfaces as [`LogmaskError::RuleLoadError`].
    pub fn load_default() -> Result<Self, LogmaskError> {
        let config = RedactionConfig::load_default_rules()?;
        compile_rules(&config)
    }

    pub fn mask_char(&self) -> char {
        self.mask_char
    }

    /// Rules in application order.
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&CompiledRule> {
        self.rules.iter().find(|r| r.name() == name)
    }

    pub fn descriptors(&self) -> Vec<RuleDescriptor> {
        self.rules
            .iter()
            .enumerate()
            .map(|(i, rule)| RuleDescriptor {
                order: i + 1,
                name: rule.name().to_string(),
                category: rule.category().to_string(),
                policy: rule.policy(),
            })
            .collect()
    }
}

fn compile_rule(rule: &RedactionRule, mask_char: char) -> Result<CompiledRule, LogmaskError> {
    let pattern = rule.pattern.as_deref().ok_or_else(|| {
        LogmaskError::InvalidRuleDefinition(format!("rule '{}' has no pattern", rule.name))
    })?;

    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err(LogmaskError::PatternLengthExceeded(
            rule.name.clone(),
            pattern.len(),
            MAX_PATTERN_LENGTH,
        ));
    }

    let regex = RegexBuilder::new(pattern)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
        .map_err(|e| LogmaskError::RuleCompilationError(rule.name.clone(), e))?;

    let probe = mask_runes(&"x".repeat(MASK_PROBE_LEN), mask_char);
    if regex.is_match(&probe) {
        return Err(LogmaskError::MaskCollision(rule.name.clone(), mask_char));
    }

    let compiled = match rule.policy {
        ReplacementPolicy::WholeMatch => CompiledRule::WholeMatch(WholeMatchRule {
            name: rule.name.clone(),
            category: rule.category.clone(),
            regex,
        }),
        ReplacementPolicy::AnchoredCapture => {
            // captures_len counts the implicit whole-match group 0.
            if regex.captures_len() < 3 {
                return Err(LogmaskError::MissingCaptureGroup(
                    rule.name.clone(),
                    regex.captures_len() - 1,
                ));
            }
            CompiledRule::AnchoredCapture(AnchoredCaptureRule {
                name: rule.name.clone(),
                category: rule.category.clone(),
                regex,
            })
        }
    };

    Ok(compiled)
}

/// Compiles a rule definition into a `RuleSet`, keeping the declared order.
///
/// All rules are attempted; failures are reported together.
pub fn compile_rules(config: &RedactionConfig) -> Result<RuleSet, LogmaskError> {
    debug!("Starting compilation of {} rules.", config.rules.len());

    let mut compiled_rules = Vec::with_capacity(config.rules.len());
    let mut compilation_errors = Vec::new();

    for rule in &config.rules {
        match compile_rule(rule, config.mask_char) {
            Ok(compiled) => {
                debug!(
                    target: "logmask_core::sanitizer",
                    "Rule '{}' compiled successfully ({}).",
                    compiled.name(),
                    compiled.policy()
                );
                compiled_rules.push(compiled);
            }
            Err(e) => compilation_errors.push(e),
        }
    }

    match compilation_errors.len() {
        0 => {
            debug!("Finished compiling rules. Total compiled: {}.", compiled_rules.len());
            Ok(RuleSet {
                mask_char: config.mask_char,
                rules: compiled_rules,
            })
        }
        1 => Err(compilation_errors.remove(0)),
        n => {
            let error_message = compilation_errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<String>>()
                .join("\n");
            Err(LogmaskError::Fatal(format!("Failed to compile {} rule(s):\n{}", n, error_message)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(mask_char: char, rules: Vec<RedactionRule>) -> RedactionConfig {
        RedactionConfig { mask_char, rules }
    }

    fn rule(name: &str, pattern: &str, policy: ReplacementPolicy) -> RedactionRule {
        RedactionRule {
            name: name.to_string(),
            pattern: Some(pattern.to_string()),
            policy,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_rule_set_compiles() {
        let rules = RuleSet::load_default().unwrap();
        assert_eq!(rules.len(), 10);
        assert_eq!(rules.mask_char(), '*');
        assert_eq!(rules.rules()[0].name(), "bearer_token");
        assert_eq!(rules.rules()[1].name(), "jwt");
        assert_eq!(rules.rules()[9].policy(), ReplacementPolicy::AnchoredCapture);
    }

    #[test]
    fn test_no_default_rule_matches_mask_run() {
        let rules = RuleSet::load_default().unwrap();
        let probe = "*".repeat(200);
        for rule in rules.rules() {
            assert!(!rule.regex().is_match(&probe), "rule '{}' matches mask run", rule.name());
        }
    }

    #[test]
    fn test_mask_collision_is_rejected() {
        let config = config_with('#', vec![rule("hashes", "#{3}", ReplacementPolicy::WholeMatch)]);
        match compile_rules(&config) {
            Err(LogmaskError::MaskCollision(name, mask)) => {
                assert_eq!(name, "hashes");
                assert_eq!(mask, '#');
            }
            other => panic!("expected MaskCollision, got {:?}", other),
        }
    }

    #[test]
    fn test_multibyte_mask_char_compiles() {
        let mut config = RedactionConfig::load_default_rules().unwrap();
        config.mask_char = '●';
        let rules = compile_rules(&config).unwrap();
        assert_eq!(rules.mask_char(), '●');
    }

    #[test]
    fn test_multiple_failures_are_reported_together() {
        let config = config_with(
            '*',
            vec![
                rule("broken", "(unclosed", ReplacementPolicy::WholeMatch),
                rule("stars", r"\*+", ReplacementPolicy::WholeMatch),
            ],
        );
        let err = compile_rules(&config).unwrap_err().to_string();
        assert!(err.contains("Failed to compile 2 rule(s)"));
        assert!(err.contains("'broken'"));
        assert!(err.contains("'stars'"));
    }

    #[test]
    fn test_anchored_rule_requires_two_groups() {
        let config = config_with(
            '*',
            vec![rule("name", "(姓名：)[一-龥]{2}", ReplacementPolicy::AnchoredCapture)],
        );
        match compile_rules(&config) {
            Err(LogmaskError::MissingCaptureGroup(name, found)) => {
                assert_eq!(name, "name");
                assert_eq!(found, 1);
            }
            other => panic!("expected MissingCaptureGroup, got {:?}", other),
        }
    }

    #[test]
    fn test_pattern_length_limit() {
        let long = "a".repeat(MAX_PATTERN_LENGTH + 1);
        let config = config_with('*', vec![rule("long", &long, ReplacementPolicy::WholeMatch)]);
        assert!(matches!(
            compile_rules(&config),
            Err(LogmaskError::PatternLengthExceeded(_, len, MAX_PATTERN_LENGTH)) if len == MAX_PATTERN_LENGTH + 1
        ));
    }

    #[test]
    fn test_anchored_replacement_keeps_prefix() {
        let rules = RuleSet::load_default().unwrap();
        let rule = rules.get("cjk_name").unwrap();
        let caps = rule.regex().captures("姓名：歐美").unwrap();
        assert_eq!(rule.replacement(&caps, '*'), "姓名：**");
        assert_eq!(rule.masked_span(&caps).unwrap().as_str(), "歐美");
    }

    #[test]
    fn test_descriptors_are_one_based_and_ordered() {
        let rules = RuleSet::load_default().unwrap();
        let descriptors = rules.descriptors();
        assert_eq!(descriptors.len(), rules.len());
        assert_eq!(descriptors[0].order, 1);
        assert_eq!(descriptors[0].name, "bearer_token");
        assert_eq!(descriptors[0].category, "authorization");
        assert_eq!(descriptors.last().unwrap().name, "cjk_name");
    }
}
