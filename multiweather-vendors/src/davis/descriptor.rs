//! Davis vendor descriptor.

use std::sync::Arc;

use multiweather_core::Vendor;
use multiweather_fetch::{AuthKind, FetchContext};

use super::parser::DavisNormalizer;
use super::request::DavisRequestBuilder;
use crate::auth::HmacSignedAuth;
use crate::descriptor::{AdapterPlan, ParamTable, VendorAdapter, VendorDescriptor, VendorMetadata};

pub fn davis_descriptor() -> VendorDescriptor {
    VendorDescriptor {
        id: Vendor::Davis,
        metadata: VendorMetadata {
            display_name: "WeatherLink",
            cli_name: "davis",
            auth_kind: AuthKind::HmacSigned,
            docs_url: "https://weatherlink.github.io/v2-api/",
            host: "api.weatherlink.com",
        },
        params: ParamTable {
            station_param: "sn",
            required: &["sn", "apikey", "apisec"],
            optional: &["current"],
            needs_timezone: false,
        },
        adapter_plan: AdapterPlan {
            build_adapter: build_davis_adapter,
        },
    }
}

fn build_davis_adapter(_ctx: &FetchContext) -> VendorAdapter {
    VendorAdapter {
        auth: Arc::new(HmacSignedAuth::new()),
        preparer: None,
        builder: Arc::new(DavisRequestBuilder),
        normalizer: Arc::new(DavisNormalizer),
    }
}
