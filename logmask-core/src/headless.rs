// logmask-core/src/headless.rs
//! One-shot redaction with the built-in rules, for callers that do not want
//! to manage an engine themselves.
//!
//! The engine is compiled on first use and kept for the life of the process.
//! It is never mutated after initialisation.

use anyhow::Result;
use once_cell::sync::OnceCell;

use crate::engine::SanitizationEngine;
use crate::engines::pii_engine::PiiEngine;

static DEFAULT_ENGINE: OnceCell<PiiEngine> = OnceCell::new();

/// The process-wide engine over the built-in rule set.
///
/// Only the first call can fail, and only if the embedded rules do not
/// compile.
pub fn default_engine() -> Result<&'static PiiEngine> {
    let engine = DEFAULT_ENGINE.get_or_try_init(PiiEngine::with_default_rules)?;
    Ok(engine)
}

/// Masks all PII the built-in rules detect in `content`.
pub fn redact_pii(content: &str) -> Result<String> {
    Ok(default_engine()?.sanitize(content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_pii_masks_with_default_rules() -> Result<()> {
        assert_eq!(redact_pii("Phone: 0912345678")?, "Phone: **********");
        Ok(())
    }

    #[test]
    fn test_default_engine_is_initialised_once() -> Result<()> {
        let a = default_engine()?;
        let b = default_engine()?;
        assert!(std::ptr::eq(a, b));
        Ok(())
    }
}
