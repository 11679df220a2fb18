//! Shared fixtures for facade tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use multiweather_fetch::{
    FetchContext, HttpRequest, ManualClock, Transport, TransportError, TransportResponse,
};
use multiweather_vendors::WeatherClient;

enum Reply {
    Respond(TransportResponse),
    Timeout,
}

/// Transport that records every request and answers from a script.
///
/// Routes match on a URL substring; the most recently added match wins.
/// Unmatched requests get a 404.
#[derive(Default)]
pub struct StubTransport {
    routes: Mutex<Vec<(String, Reply)>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StubTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, url_fragment: &str, status: u16, body: &str) {
        self.routes.lock().unwrap().push((
            url_fragment.to_string(),
            Reply::Respond(TransportResponse::new(status, body)),
        ));
    }

    pub fn time_out(&self, url_fragment: &str) {
        self.routes
            .lock()
            .unwrap()
            .push((url_fragment.to_string(), Reply::Timeout));
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn calls_to(&self, url_fragment: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.url.as_str().contains(url_fragment))
            .count()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

impl std::fmt::Debug for StubTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StubTransport")
            .field("calls", &self.calls())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn execute(&self, request: &HttpRequest) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        let routes = self.routes.lock().unwrap();
        let url = request.url.as_str();
        match routes.iter().rev().find(|(frag, _)| url.contains(frag.as_str())) {
            Some((_, Reply::Respond(resp))) => Ok(resp.clone()),
            Some((_, Reply::Timeout)) => Err(TransportError::Timeout(Duration::from_secs(30))),
            None => Ok(TransportResponse::new(404, "no route")),
        }
    }
}

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

/// Builds a client over the stub transport and a manual clock.
pub fn client(transport: &Arc<StubTransport>, clock: &Arc<ManualClock>) -> WeatherClient {
    let ctx = FetchContext::builder()
        .transport(Arc::clone(transport) as Arc<dyn Transport>)
        .clock(Arc::clone(clock) as Arc<dyn multiweather_fetch::Clock>)
        .build()
        .unwrap();
    WeatherClient::with_context(ctx)
}
