//! A scripted [`Transport`] for tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use http::StatusCode;
use hyper::body::Bytes;

use super::{CloudRequest, CloudResponse, Transport};

/// Replays queued responses in order and records every request it sees.
///
/// Running out of responses is reported as a transport failure.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<CloudResponse>>,
    requests: Mutex<Vec<CloudRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_json(&self, status: u16, body: serde_json::Value) {
        self.push(status, Bytes::from(body.to_string()));
    }

    pub fn push_raw(&self, status: u16, body: &'static str) {
        self.push(status, Bytes::from_static(body.as_bytes()));
    }

    fn push(&self, status: u16, body: Bytes) {
        let status = StatusCode::from_u16(status).unwrap();
        self.responses
            .lock()
            .unwrap()
            .push_back(CloudResponse { status, body });
    }

    pub fn requests(&self) -> Vec<CloudRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The JSON body of the `n`th request.
    pub fn json_body(&self, n: usize) -> serde_json::Value {
        let requests = self.requests.lock().unwrap();
        let body = requests[n].body.as_ref().expect("request had no body");
        serde_json::from_slice(body).unwrap()
    }

    /// The value of query parameter `key` on the `n`th request.
    pub fn query_param(&self, n: usize, key: &str) -> Option<String> {
        let requests = self.requests.lock().unwrap();
        requests[n]
            .url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: CloudRequest) -> anyhow::Result<CloudResponse> {
        let summary = format!("{} {}", request.method, request.url);
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("no scripted response for {summary}"))
    }
}
