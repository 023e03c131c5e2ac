// logmask-core/src/engines/mod.rs
//! Concrete implementations of the `SanitizationEngine` trait.
//!
//! `pii_engine` runs the ordered PII rule set as sequential full-text passes.

pub mod pii_engine;
