//! Text output formatting with colors.

use multiweather_vendors::VendorDescriptor;

use super::json::FetchSummary;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats one fetch result.
    ///
    /// `davis       GOOD   12 readings  -> out/davis.json`
    pub fn format_fetch(&self, summary: &FetchSummary) -> String {
        let status = match summary.status.as_str() {
            "GOOD" => self.green("GOOD"),
            "ERROR" => self.yellow("ERROR"),
            other => self.red(other),
        };

        let mut line = format!(
            "{:<10} {} {}",
            self.bold(&summary.vendor),
            status,
            self.dim(&format!("{} readings", summary.readings))
        );
        if let Some(code) = summary.status_code {
            line.push_str(&format!(" (HTTP {code})"));
        }
        if let Some(path) = &summary.path {
            line.push_str(&format!(" -> {path}"));
        }
        if let Some(error) = &summary.error {
            line.push_str(&format!("\n  {}", self.red(error)));
        }
        line
    }

    /// Formats the vendor list header.
    pub fn format_vendors_header(&self) -> String {
        format!(
            "{:<22} {:<10} {:<16} {:<7} {}",
            self.bold("Vendor"),
            self.bold("CLI"),
            self.bold("Auth"),
            self.bold("Local"),
            self.bold("Host")
        )
    }

    /// Formats a single vendor line.
    pub fn format_vendor_line(&self, desc: &VendorDescriptor) -> String {
        let local = if desc.id.needs_local_time() {
            self.green("✓")
        } else {
            self.dim("−")
        };

        format!(
            "{:<22} {:<10} {:<16} {:<7} {}",
            desc.display_name(),
            desc.cli_name(),
            desc.metadata.auth_kind.display_name(),
            local,
            desc.metadata.host
        )
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }
}
