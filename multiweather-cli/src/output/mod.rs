//! Output formatting for CLI.

mod json;
mod text;

pub use json::{FetchSummary, JsonFormatter};
pub use text::TextFormatter;
