//! Zentra vendor descriptor.

use std::sync::Arc;

use multiweather_core::Vendor;
use multiweather_fetch::{AuthKind, FetchContext};

use super::parser::ZentraNormalizer;
use super::request::ZentraRequestBuilder;
use crate::auth::StaticKeyAuth;
use crate::descriptor::{AdapterPlan, ParamTable, VendorAdapter, VendorDescriptor, VendorMetadata};

pub fn zentra_descriptor() -> VendorDescriptor {
    VendorDescriptor {
        id: Vendor::Zentra,
        metadata: VendorMetadata {
            display_name: "ZENTRA Cloud",
            cli_name: "zentra",
            auth_kind: AuthKind::StaticKey,
            docs_url: "https://zentracloud.com/api/v3/documentation/",
            host: "zentracloud.com",
        },
        params: ParamTable {
            station_param: "sn",
            required: &["sn", "token"],
            optional: &["start_mrid", "end_mrid", "sensor_sn"],
            needs_timezone: true,
        },
        adapter_plan: AdapterPlan {
            build_adapter: build_zentra_adapter,
        },
    }
}

fn build_zentra_adapter(_ctx: &FetchContext) -> VendorAdapter {
    VendorAdapter {
        auth: Arc::new(StaticKeyAuth::new("zentra.token")),
        preparer: None,
        builder: Arc::new(ZentraRequestBuilder),
        normalizer: Arc::new(ZentraNormalizer),
    }
}
