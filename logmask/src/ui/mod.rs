//! Terminal output helpers: status messages, the redaction summary table and
//! the diff view. Colour is only used when the target stream is a terminal.

pub mod diff_viewer;
pub mod output_format;
pub mod redaction_summary;
