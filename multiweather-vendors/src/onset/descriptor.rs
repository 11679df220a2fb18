//! Onset vendor descriptor.

use std::sync::Arc;

use multiweather_core::Vendor;
use multiweather_fetch::{AuthKind, FetchContext};

use super::auth::OnsetGrant;
use super::parser::OnsetNormalizer;
use super::request::OnsetRequestBuilder;
use crate::auth::TokenExchangeAuth;
use crate::descriptor::{AdapterPlan, ParamTable, VendorAdapter, VendorDescriptor, VendorMetadata};

pub fn onset_descriptor() -> VendorDescriptor {
    VendorDescriptor {
        id: Vendor::Onset,
        metadata: VendorMetadata {
            display_name: "HOBOlink",
            cli_name: "onset",
            auth_kind: AuthKind::TokenExchange,
            docs_url: "https://webservice.hobolink.com/ws/data/info/index.html",
            host: "webservice.hobolink.com",
        },
        params: ParamTable {
            station_param: "sn",
            required: &["sn", "client_id", "client_secret", "user_id"],
            optional: &["ret_form", "sensor_sn"],
            needs_timezone: false,
        },
        adapter_plan: AdapterPlan {
            build_adapter: build_onset_adapter,
        },
    }
}

fn build_onset_adapter(ctx: &FetchContext) -> VendorAdapter {
    VendorAdapter {
        auth: Arc::new(TokenExchangeAuth::new(
            "onset.client_credentials",
            OnsetGrant,
            Arc::clone(&ctx.clock),
        )),
        preparer: None,
        builder: Arc::new(OnsetRequestBuilder),
        normalizer: Arc::new(OnsetNormalizer),
    }
}
