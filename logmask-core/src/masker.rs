// logmask-core/src/masker.rs
//! Rune-safe masking.
//!
//! Every rule in the pipeline replaces text through [`mask_runes`], so the
//! masked output never reveals anything about a span except how many code
//! points it had. Length is counted in `char`s, never in bytes: `歐美` becomes
//! two mask characters, not six.

/// The glyph used by the built-in rule set.
pub const DEFAULT_MASK_CHAR: char = '*';

/// Returns `mask` repeated once per Unicode code point of `span`.
pub fn mask_runes(span: &str, mask: char) -> String {
    std::iter::repeat(mask).take(span.chars().count()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_ascii_span() {
        assert_eq!(mask_runes("user@example.com", '*'), "*".repeat(16));
    }

    #[test]
    fn test_mask_counts_code_points_not_bytes() {
        let span = "歐美麗";
        assert_eq!(span.len(), 9);
        assert_eq!(mask_runes(span, '*'), "***");
    }

    #[test]
    fn test_mask_combining_marks_count_individually() {
        // 'e' followed by U+0301 COMBINING ACUTE ACCENT is two code points.
        assert_eq!(mask_runes("e\u{301}", '*'), "**");
    }

    #[test]
    fn test_mask_empty_span() {
        assert_eq!(mask_runes("", '*'), "");
    }

    #[test]
    fn test_mask_with_multibyte_mask_char() {
        let masked = mask_runes("3號", '●');
        assert_eq!(masked, "●●");
        assert_eq!(masked.chars().count(), 2);
    }
}
