use anyhow::Context;
use async_trait::async_trait;
use http::{HeaderMap, Method, StatusCode};
use hyper::body::Bytes;
use hyper::client::HttpConnector;
use hyper::{Body, Client};
use hyper_tls::HttpsConnector;
use url::Url;

/// A fully formed outbound request to the cloud API.
#[derive(Clone, Debug)]
pub struct CloudRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

#[derive(Clone, Debug)]
pub struct CloudResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Sends one request and buffers the whole response.
///
/// Only failures to talk to the server at all are errors here; any status
/// code the server answers with is a valid [`CloudResponse`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: CloudRequest) -> anyhow::Result<CloudResponse>;
}

/// The production transport: a pooled hyper client over native TLS.
#[derive(Clone)]
pub struct HyperTransport {
    client: Client<HttpsConnector<HttpConnector>>,
}

impl HyperTransport {
    pub fn new() -> Self {
        let https = HttpsConnector::new();
        Self {
            client: Client::builder().build::<_, Body>(https),
        }
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HyperTransport {
    async fn send(&self, request: CloudRequest) -> anyhow::Result<CloudResponse> {
        let CloudRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut builder = hyper::Request::builder()
            .method(method.clone())
            .uri(url.as_str());
        if let Some(h) = builder.headers_mut() {
            h.extend(headers);
        }
        let req = builder
            .body(body.map(Body::from).unwrap_or_else(Body::empty))
            .with_context(|| format!("failed to build {method} request"))?;

        log::debug!("{method} {}", url.path());
        let res = self
            .client
            .request(req)
            .await
            .with_context(|| format!("{method} {} failed", url.path()))?;

        let status = res.status();
        let body = hyper::body::to_bytes(res.into_body())
            .await
            .with_context(|| format!("failed to read {method} {} response", url.path()))?;

        Ok(CloudResponse { status, body })
    }
}
