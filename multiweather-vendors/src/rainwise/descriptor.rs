//! Rainwise vendor descriptor.

use std::sync::Arc;

use multiweather_core::Vendor;
use multiweather_fetch::{AuthKind, FetchContext};

use super::parser::RainwiseNormalizer;
use super::request::RainwiseRequestBuilder;
use crate::auth::RegisteredAuth;
use crate::descriptor::{AdapterPlan, ParamTable, VendorAdapter, VendorDescriptor, VendorMetadata};

pub fn rainwise_descriptor() -> VendorDescriptor {
    VendorDescriptor {
        id: Vendor::Rainwise,
        metadata: VendorMetadata {
            display_name: "Rainwise",
            cli_name: "rainwise",
            auth_kind: AuthKind::Registered,
            docs_url: "http://api.rainwise.net/main/v1.5/",
            host: "api.rainwise.net",
        },
        params: ParamTable {
            station_param: "mac",
            required: &["username", "sid", "pid", "mac"],
            optional: &["interval", "ret_form"],
            needs_timezone: true,
        },
        adapter_plan: AdapterPlan {
            build_adapter: build_rainwise_adapter,
        },
    }
}

fn build_rainwise_adapter(_ctx: &FetchContext) -> VendorAdapter {
    VendorAdapter {
        auth: Arc::new(RegisteredAuth::new()),
        preparer: None,
        builder: Arc::new(RainwiseRequestBuilder),
        normalizer: Arc::new(RainwiseNormalizer),
    }
}
