//! JSON output formatting.

use std::path::Path;

use anyhow::Result;
use multiweather_core::{ResponseEnvelope, Vendor};
use multiweather_vendors::VendorDescriptor;
use serde::Serialize;

// ============================================================================
// Output Types
// ============================================================================

/// Result of fetching one vendor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchSummary {
    pub vendor: String,
    /// `GOOD`, `ERROR`, or `FAILED` when no envelope was produced.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub readings: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FetchSummary {
    /// Summarizes a written envelope.
    pub fn from_envelope(envelope: &ResponseEnvelope, path: &Path) -> Self {
        Self::describe(envelope, Some(path))
    }

    /// Summarizes an envelope that could not be written.
    pub fn unwritten(envelope: &ResponseEnvelope, error: &anyhow::Error) -> Self {
        let mut summary = Self::describe(envelope, None);
        summary.error = Some(match &summary.error {
            Some(vendor_error) => format!("{vendor_error}; {error:#}"),
            None => format!("{error:#}"),
        });
        summary
    }

    fn describe(envelope: &ResponseEnvelope, path: Option<&Path>) -> Self {
        let meta = &envelope.metadata;
        Self {
            vendor: meta.vendor.cli_name().to_string(),
            status: if envelope.is_good() { "GOOD" } else { "ERROR" }.to_string(),
            station_id: Some(meta.station_id.clone()),
            status_code: meta.status_code,
            readings: envelope.resp_parsed.len(),
            path: path.map(|p| p.display().to_string()),
            error: meta.error_msg.clone(),
        }
    }

    /// Summarizes a call that raised before producing an envelope.
    pub fn failed(vendor: Vendor, error: &anyhow::Error) -> Self {
        Self {
            vendor: vendor.cli_name().to_string(),
            status: "FAILED".to_string(),
            station_id: None,
            status_code: None,
            readings: 0,
            path: None,
            error: Some(format!("{error:#}")),
        }
    }
}

/// Vendor info for the vendors command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorInfoOutput {
    pub id: String,
    pub display_name: String,
    pub auth: String,
    pub host: String,
    pub docs_url: String,
    pub env_var: String,
    pub station_param: String,
    pub required: Vec<String>,
    pub optional: Vec<String>,
    pub local_time: bool,
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats the vendor list.
    pub fn format_vendors(&self, vendors: &[VendorDescriptor]) -> Result<String> {
        let outputs: Vec<VendorInfoOutput> = vendors
            .iter()
            .map(|desc| VendorInfoOutput {
                id: desc.cli_name().to_string(),
                display_name: desc.display_name().to_string(),
                auth: desc.metadata.auth_kind.to_string(),
                host: desc.metadata.host.to_string(),
                docs_url: desc.metadata.docs_url.to_string(),
                env_var: desc.id.env_var().to_string(),
                station_param: desc.params.station_param.to_string(),
                required: desc
                    .required_params()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
                optional: desc.params.optional.iter().map(|s| (*s).to_string()).collect(),
                local_time: desc.id.needs_local_time(),
            })
            .collect();

        self.format(&outputs)
    }
}
