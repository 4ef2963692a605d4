use crate::course_catalog::domain::PlatformEndpoint;
use crate::shared::error::PlatformError;
use crate::shared::PlatformResult;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

/// HTTP methods used against the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const REDACTED_KEY: &str = "***";

/// Everything needed to perform one request against the platform.
///
/// Built fresh for every call and never modified after it is handed to a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    /// Absolute path including the API root, without query string
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub scheme: String,
    pub host: String,
    pub port: u16,
    pub host_header: String,
    pub api_key: String,
}

impl RequestDescriptor {
    /// Starts a request for `endpoint` (e.g. `/products/abc`) under the API root.
    pub fn new(target: &PlatformEndpoint, method: HttpMethod, endpoint: &str) -> Self {
        Self {
            method,
            path: format!("{}{}", target.api_root, endpoint),
            query: Vec::new(),
            body: None,
            scheme: target.scheme.clone(),
            host: target.host.clone(),
            port: target.port,
            host_header: target.host_header.clone(),
            api_key: target.api_key.clone(),
        }
    }

    pub fn with_query(mut self, name: &str, value: &str) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Path plus query string; the API key is always the last parameter.
    pub fn request_target(&self) -> String {
        self.target_with_key(&self.api_key)
    }

    /// [`request_target`](Self::request_target) with the API key masked, for logs
    pub fn redacted_target(&self) -> String {
        self.target_with_key(REDACTED_KEY)
    }

    fn target_with_key(&self, key: &str) -> String {
        let mut target = self.path.clone();
        let params = self
            .query
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .chain(std::iter::once(("key", key)));

        for (index, (name, value)) in params.enumerate() {
            target.push(if index == 0 { '?' } else { '&' });
            target.push_str(&urlencoding::encode(name));
            target.push('=');
            target.push_str(&urlencoding::encode(value));
        }
        target
    }

    /// Serialized JSON body, if any
    pub fn body_bytes(&self) -> PlatformResult<Option<Vec<u8>>> {
        self.body
            .as_ref()
            .map(|body| {
                serde_json::to_vec(body).map_err(|e| PlatformError::InvalidRequest {
                    details: format!("request body could not be serialized: {}", e),
                })
            })
            .transpose()
    }

    /// `host:port`
    pub fn target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Full URL including the query string
    pub fn url(&self) -> String {
        format!("{}://{}{}", self.scheme, self.host_header, self.request_target())
    }
}

/// Parsed body of a successful exchange.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// 204 or an empty 2xx body
    Empty,
    /// Unwrapped `Content` of the platform envelope (or the whole document if unwrapped)
    Json(Value),
}

/// Result of one successful exchange with the platform.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    pub status: u16,
    pub reason: String,
    pub body: ResponseBody,
}

impl ResponseEnvelope {
    pub fn is_success_marker(&self) -> bool {
        matches!(self.body, ResponseBody::Empty)
    }

    /// The content, with an empty body rendered as `{"success": true}`
    pub fn into_content(self) -> Value {
        match self.body {
            ResponseBody::Empty => success_marker(),
            ResponseBody::Json(value) => value,
        }
    }
}

/// Content reported for writes that produced no body
pub fn success_marker() -> Value {
    json!({ "success": true })
}

/// PlatformTransport port: one HTTP request/response cycle, no retries.
#[async_trait]
pub trait PlatformTransport: Send + Sync {
    /// Sends `request` and interprets the reply.
    ///
    /// # Errors
    /// Returns a [`PlatformError`] for transport, framing, status,
    /// platform-logical and body-parse failures.
    async fn send(&self, request: &RequestDescriptor) -> PlatformResult<ResponseEnvelope>;
}

#[async_trait]
impl<T: PlatformTransport + ?Sized> PlatformTransport for &T {
    async fn send(&self, request: &RequestDescriptor) -> PlatformResult<ResponseEnvelope> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<T: PlatformTransport + ?Sized> PlatformTransport for Arc<T> {
    async fn send(&self, request: &RequestDescriptor) -> PlatformResult<ResponseEnvelope> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<T: PlatformTransport + ?Sized> PlatformTransport for Box<T> {
    async fn send(&self, request: &RequestDescriptor) -> PlatformResult<ResponseEnvelope> {
        (**self).send(request).await
    }
}
