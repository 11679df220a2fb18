//! Campbell vendor descriptor.

use std::sync::Arc;

use multiweather_core::Vendor;
use multiweather_fetch::{AuthKind, FetchContext};

use super::auth::CampbellAuth;
use super::discovery::CampbellDiscovery;
use super::parser::CampbellNormalizer;
use super::request::CampbellRequestBuilder;
use crate::descriptor::{AdapterPlan, ParamTable, VendorAdapter, VendorDescriptor, VendorMetadata};

pub fn campbell_descriptor() -> VendorDescriptor {
    VendorDescriptor {
        id: Vendor::Campbell,
        metadata: VendorMetadata {
            display_name: "Campbell Cloud",
            cli_name: "campbell",
            auth_kind: AuthKind::TokenExchange,
            docs_url: "https://docs.campbellcloud.io/api/",
            host: "api.campbellcloud.io",
        },
        params: ParamTable {
            station_param: "station_id",
            required: &["station_id", "station_lid", "username", "user_passwd"],
            optional: &["access_token", "measurements", "sensor_sn"],
            needs_timezone: false,
        },
        adapter_plan: AdapterPlan {
            build_adapter: build_campbell_adapter,
        },
    }
}

fn build_campbell_adapter(ctx: &FetchContext) -> VendorAdapter {
    VendorAdapter {
        auth: Arc::new(CampbellAuth::new(Arc::clone(&ctx.clock))),
        preparer: Some(Arc::new(CampbellDiscovery::new())),
        builder: Arc::new(CampbellRequestBuilder),
        normalizer: Arc::new(CampbellNormalizer),
    }
}
