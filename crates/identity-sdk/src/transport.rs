//! HTTP transport seam.
//!
//! Request builders produce a fully-assembled [`HttpRequest`]; a
//! [`Transport`] executes it.  The default [`ReqwestTransport`] wraps a
//! `reqwest::Client`; tests plug in their own implementation.

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde_json::Value;

use crate::error::SdkError;

/// An outbound request, ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute target URL.
    pub url: Url,
    /// Extra headers, in insertion order.
    pub headers: Vec<(String, String)>,
    /// JSON body, if any.
    pub body: Option<Value>,
}

impl HttpRequest {
    pub(crate) fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    pub(crate) fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    pub(crate) fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Look up a header value (case-insensitive name).
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A raw response: status and body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw body (possibly empty).
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Whether the status is in the `2xx` range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The transport failed before a response was received.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Executes [`HttpRequest`]s.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return whatever the server answered, success
    /// or not.  Only failures to obtain a response are errors.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with a default `reqwest` client.
    pub fn new() -> Result<Self, SdkError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http })
    }

    /// Wrap an existing `reqwest` client (custom TLS, proxies, timeouts…).
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .http
            .request(request.method, request.url)
            .header(reqwest::header::ACCEPT, "application/json");

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let res = builder
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        let status = res.status().as_u16();
        let body = res
            .bytes()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest::new(
            Method::GET,
            Url::parse("https://example.com/").unwrap(),
        )
        .header("Authorization", "Bearer t");
        assert_eq!(req.header_value("authorization"), Some("Bearer t"));
        assert!(req.header_value("content-type").is_none());
    }

    #[test]
    fn success_range() {
        let ok = HttpResponse {
            status: 204,
            body: Vec::new(),
        };
        let redirect = HttpResponse {
            status: 302,
            body: Vec::new(),
        };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
    }
}
