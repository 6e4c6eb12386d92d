//! Outbound calls to the group-management cloud API.

use std::sync::Arc;

use anyhow::{anyhow, Context};
use http::header::{HeaderValue, CONTENT_TYPE};
use http::{HeaderMap, Method, StatusCode};
use itertools::Itertools;
use serde_json::Value;
use url::Url;

use crate::http::Error;

pub mod transport;

#[cfg(test)]
pub mod testing;

pub use transport::{CloudRequest, CloudResponse, HyperTransport, Transport};

pub const API_KEY_HEADER: &str = "x-api-key";

/// Authenticated client for the cloud API.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct CloudClient {
    base_url: Url,
    api_key: HeaderValue,
    transport: Arc<dyn Transport>,
}

impl CloudClient {
    pub fn new(base_url: &str, api_key: &str, transport: Arc<dyn Transport>) -> anyhow::Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("invalid cloud base url {base_url:?}"))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("cloud base url {base_url} cannot carry a path"));
        }

        let mut api_key =
            HeaderValue::from_str(api_key).context("API key is not a valid header value")?;
        api_key.set_sensitive(true);

        Ok(Self {
            base_url,
            api_key,
            transport,
        })
    }

    /// The base url with `segments` appended, each percent-encoded.
    pub fn endpoint<I>(&self, segments: I) -> Url
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Makes one call and normalizes the outcome.
    ///
    /// A 2xx response yields its JSON body, or `{}` when the body is empty or not JSON.
    /// Anything else becomes [`Error::Upstream`].
    pub async fn call(&self, method: Method, url: Url, body: Option<&Value>) -> Result<Value, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, self.api_key.clone());
        let body = match body {
            Some(json) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                Some(serde_json::to_vec(json).context("failed to encode request body")?.into())
            }
            None => None,
        };

        let response = self
            .transport
            .send(CloudRequest {
                method: method.clone(),
                url: url.clone(),
                headers,
                body,
            })
            .await
            .map_err(Error::Transport)?;

        let parsed = serde_json::from_slice::<Value>(&response.body).ok();

        if response.status.is_success() {
            return Ok(parsed.unwrap_or_else(empty_object));
        }

        let payload = parsed.unwrap_or_else(empty_object);
        let message = error_message(response.status, &payload);
        log::debug!("{method} {} -> {}: {message}", url.path(), response.status);

        Err(Error::Upstream {
            status: response.status,
            message,
            payload,
        })
    }
}

fn empty_object() -> Value {
    Value::Object(Default::default())
}

/// `code: message` for each entry of the body's `errors` list, joined with ` | `.
///
/// Falls back to a top-level `code`/`message` pair, then to the status text.
fn error_message(status: StatusCode, payload: &Value) -> String {
    let joined = payload
        .get("errors")
        .and_then(Value::as_array)
        .map(|errors| errors.iter().filter_map(describe).join(" | "))
        .filter(|msg| !msg.is_empty())
        .or_else(|| describe(payload));

    joined.unwrap_or_else(|| {
        status
            .canonical_reason()
            .map(str::to_owned)
            .unwrap_or_else(|| status.as_str().to_owned())
    })
}

fn describe(entry: &Value) -> Option<String> {
    let code = entry.get("code").and_then(field_text);
    let message = entry.get("message").and_then(field_text);
    match (code, message) {
        (Some(code), Some(message)) => Some(format!("{code}: {message}")),
        (Some(text), None) | (None, Some(text)) => Some(text),
        (None, None) => None,
    }
}

fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
