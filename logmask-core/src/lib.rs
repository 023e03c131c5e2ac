// logmask-core/src/lib.rs
//! # logmask Core Library
//!
//! `logmask-core` masks personally identifiable information in free-form
//! operational text, such as container logs, before that text is shown to
//! anyone. Everything that is not PII, including CJK prose, comes back
//! byte-for-byte unchanged.
//!
//! ## Modules
//!
//! * `masker`: code-point-counting mask generation.
//! * `config`: the embedded, ordered rule definition and its validation.
//! * `sanitizers`: compilation of the definition into an immutable `RuleSet`.
//! * `engine`: the `SanitizationEngine` trait.
//! * `engines`: the `PiiEngine` pipeline.
//! * `redaction_match`: PII-free records of masked spans.
//! * `headless`: one-shot redaction with the built-in rules.
//! * `errors`: the library's error type.
//!
//! ## How redaction works
//!
//! Rules run one at a time, in a fixed order, each over the whole current
//! text. A whole-match rule replaces its entire match with one mask
//! character per code point. The final anchored-capture rule keeps a
//! keyword such as `姓名：` and masks only the 2-4 ideographs after it.
//! Order matters: `Bearer <token>` is masked as one unit before the JWT
//! rule can see the token on its own.
//!
//! ## Usage Example
//!
//! ```rust
//! use logmask_core::{PiiEngine, SanitizationEngine};
//!
//! let engine = PiiEngine::with_default_rules().unwrap();
//! assert_eq!(engine.sanitize("Phone: 0912345678"), "Phone: **********");
//! assert_eq!(engine.sanitize("申請人：歐美麗"), "申請人：***");
//! assert_eq!(engine.sanitize("台北市中正區忠孝東路"), "台北市中正區忠孝東路");
//! ```
//!
//! ## Error Handling
//!
//! Redaction is total and never fails. Only loading or compiling a rule set
//! can fail, reported as [`LogmaskError`] (or `anyhow::Error` at the
//! loading boundary).
//!
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod masker;
pub mod redaction_match;
pub mod sanitizers;

pub use config::{
    RedactionConfig, RedactionRule, RedactionSummaryItem, ReplacementPolicy, MAX_PATTERN_LENGTH,
};

pub use errors::LogmaskError;

pub use engine::SanitizationEngine;

pub use engines::pii_engine::PiiEngine;

pub use masker::{mask_runes, DEFAULT_MASK_CHAR};

pub use redaction_match::{canonical_sample_hash, RedactionMatch};

pub use headless::{default_engine, redact_pii};

pub use sanitizers::compiler::{
    compile_rules, AnchoredCaptureRule, CompiledRule, RuleDescriptor, RuleSet, WholeMatchRule,
};
