// logmask/src/ui/diff_viewer.rs
//! Unified diff between the original and the masked text.

use diffy::{create_patch, PatchFormatter};
use std::io::{self, Write};

/// Writes a unified diff of `original` against `sanitized`.
///
/// Removed lines show the original text, so this is only meant for a user
/// inspecting their own input.
pub fn print_diff(
    original: &str,
    sanitized: &str,
    writer: &mut dyn Write,
    supports_color: bool,
) -> io::Result<()> {
    if original == sanitized {
        return writeln!(writer, "No changes detected.");
    }
    let patch = create_patch(original, sanitized);
    let formatter = if supports_color {
        PatchFormatter::new().with_color()
    } else {
        PatchFormatter::new()
    };
    write!(writer, "{}", formatter.fmt_patch(&patch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_shows_masked_line() {
        let mut out = Vec::new();
        print_diff("ok\nPhone: 0912345678\n", "ok\nPhone: **********\n", &mut out, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("-Phone: 0912345678"));
        assert!(text.contains("+Phone: **********"));
        assert!(text.contains(" ok"));
    }

    #[test]
    fn test_diff_without_changes() {
        let mut out = Vec::new();
        print_diff("same\n", "same\n", &mut out, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No changes detected.\n");
    }
}
