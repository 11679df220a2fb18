//! Spectrum vendor descriptor.

use std::sync::Arc;

use multiweather_core::Vendor;
use multiweather_fetch::{AuthKind, FetchContext};

use super::parser::SpectrumNormalizer;
use super::request::SpectrumRequestBuilder;
use crate::auth::StaticKeyAuth;
use crate::descriptor::{AdapterPlan, ParamTable, VendorAdapter, VendorDescriptor, VendorMetadata};

pub fn spectrum_descriptor() -> VendorDescriptor {
    VendorDescriptor {
        id: Vendor::Spectrum,
        metadata: VendorMetadata {
            display_name: "SpecConnect",
            cli_name: "spectrum",
            auth_kind: AuthKind::StaticKey,
            docs_url: "https://api.specconnect.net:6703/Help",
            host: "specconnect.net",
        },
        params: ParamTable {
            station_param: "sn",
            required: &["sn", "apikey"],
            optional: &["count", "date", "opt_values", "current", "sensor_sn"],
            needs_timezone: true,
        },
        adapter_plan: AdapterPlan {
            build_adapter: build_spectrum_adapter,
        },
    }
}

fn build_spectrum_adapter(_ctx: &FetchContext) -> VendorAdapter {
    VendorAdapter {
        auth: Arc::new(StaticKeyAuth::new("spectrum.apikey")),
        preparer: None,
        builder: Arc::new(SpectrumRequestBuilder),
        normalizer: Arc::new(SpectrumNormalizer),
    }
}
