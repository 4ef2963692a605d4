use super::envelope::interpret;
use crate::ports::outbound::{HttpMethod, PlatformTransport, RequestDescriptor, ResponseEnvelope};
use crate::shared::error::PlatformError;
use crate::shared::PlatformResult;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// StandardHttpTransport adapter built on reqwest
///
/// For deployments whose HTTP framing is well-formed (including https).
/// Replies go through the same envelope interpretation as the raw
/// transport, so callers cannot tell the two apart.
pub struct StandardHttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl StandardHttpTransport {
    pub fn new(timeout: Duration) -> PlatformResult<Self> {
        let user_agent = format!("course-admin/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| PlatformError::InvalidRequest {
                details: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self { client, timeout })
    }

    fn method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }

    /// reqwest errors carry the request URL, which holds the API key; it is stripped.
    fn map_error(&self, request: &RequestDescriptor, error: reqwest::Error) -> PlatformError {
        let error = error.without_url();
        if error.is_timeout() {
            PlatformError::Timeout {
                target: request.target(),
                seconds: self.timeout.as_secs(),
            }
        } else {
            PlatformError::Connection {
                target: request.target(),
                details: error.to_string(),
            }
        }
    }
}

#[async_trait]
impl PlatformTransport for StandardHttpTransport {
    async fn send(&self, request: &RequestDescriptor) -> PlatformResult<ResponseEnvelope> {
        debug!(
            method = %request.method,
            target = %request.target(),
            path = %request.redacted_target(),
            "sending request"
        );

        let mut builder = self
            .client
            .request(Self::method(request.method), request.url())
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(body) = request.body_bytes()? {
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| self.map_error(request, e))?;
        let status = response.status();
        let reason = status.canonical_reason().unwrap_or_default().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_error(request, e))?;

        debug!(status = status.as_u16(), bytes = body.len(), "platform response received");
        interpret(status.as_u16(), &reason, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course_catalog::domain::PlatformSettings;

    #[tokio::test]
    async fn test_connection_error_does_not_expose_api_key() {
        // Bind and drop to get a port nothing listens on
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let endpoint = PlatformSettings {
            api_key: "secret-key-42".to_string(),
            site_base_url: format!("http://127.0.0.1:{}/", port),
            default_category_id: String::new(),
        }
        .endpoint()
        .unwrap();
        let request = RequestDescriptor::new(&endpoint, HttpMethod::Get, "/categories");

        let error = StandardHttpTransport::new(Duration::from_secs(5))
            .unwrap()
            .send(&request)
            .await
            .unwrap_err();

        assert!(matches!(error, PlatformError::Connection { .. }));
        assert!(!error.to_string().contains("secret-key-42"));
    }
}
