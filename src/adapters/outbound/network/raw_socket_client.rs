use super::envelope::interpret;
use super::response_parser::ResponseParser;
use crate::ports::outbound::{PlatformTransport, RequestDescriptor, ResponseEnvelope};
use crate::shared::error::PlatformError;
use crate::shared::PlatformResult;
use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, warn};

/// Bound on one whole exchange (connect, write, read until close)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const READ_CHUNK_SIZE: usize = 8 * 1024;

/// RawSocketTransport adapter: hand-framed HTTP/1.1 over a fresh TCP connection
///
/// Every call opens its own connection with `Connection: close`, writes the
/// request as one byte stream and reads until the peer closes. Nothing is
/// pooled and nothing is retried. Only plain `http` targets are supported.
pub struct RawSocketTransport {
    timeout: Duration,
    user_agent: String,
}

impl Default for RawSocketTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl RawSocketTransport {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            user_agent: format!("course-admin/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Request line, headers, blank line and body as one buffer
    pub fn compose_request(&self, request: &RequestDescriptor) -> PlatformResult<Vec<u8>> {
        let body = request.body_bytes()?;

        let mut head = format!(
            "{} {} HTTP/1.1\r\n",
            request.method,
            request.request_target()
        );
        head.push_str(&format!("Host: {}\r\n", request.host_header));
        head.push_str("Accept: application/json\r\n");
        head.push_str(&format!("User-Agent: {}\r\n", self.user_agent));
        head.push_str("Connection: close\r\n");
        if let Some(payload) = &body {
            head.push_str("Content-Type: application/json\r\n");
            head.push_str(&format!("Content-Length: {}\r\n", payload.len()));
        }
        head.push_str("\r\n");

        let mut bytes = head.into_bytes();
        if let Some(payload) = body {
            bytes.extend_from_slice(&payload);
        }
        Ok(bytes)
    }

    async fn exchange(&self, request: &RequestDescriptor) -> PlatformResult<ResponseEnvelope> {
        let target = request.target();
        let connection_error = |e: std::io::Error| PlatformError::Connection {
            target: target.clone(),
            details: e.to_string(),
        };

        let payload = self.compose_request(request)?;
        let mut stream = TcpStream::connect((request.host.as_str(), request.port))
            .await
            .map_err(connection_error)?;
        stream.write_all(&payload).await.map_err(connection_error)?;
        stream.flush().await.map_err(connection_error)?;

        let mut parser = ResponseParser::new();
        let mut chunk = vec![0u8; READ_CHUNK_SIZE];
        loop {
            let read = stream.read(&mut chunk).await.map_err(connection_error)?;
            if read == 0 {
                break;
            }
            parser.feed(&chunk[..read])?;
        }

        let response = parser.finish()?;
        debug!(
            status = response.status,
            reason = %response.reason,
            bytes = response.body.len(),
            "platform response received"
        );
        interpret(response.status, &response.reason, &response.body_text())
    }
}

#[async_trait]
impl PlatformTransport for RawSocketTransport {
    async fn send(&self, request: &RequestDescriptor) -> PlatformResult<ResponseEnvelope> {
        if request.scheme != "http" {
            return Err(PlatformError::InvalidRequest {
                details: format!(
                    "the raw socket transport only speaks plain http, not {} (set `transport: standard`)",
                    request.scheme
                ),
            });
        }

        debug!(method = %request.method, path = %request.path, target = %request.target(), "sending raw request");
        // Dropping the exchange future on timeout closes the socket.
        match tokio::time::timeout(self.timeout, self.exchange(request)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(target = %request.target(), "platform request timed out");
                Err(PlatformError::Timeout {
                    target: request.target(),
                    seconds: self.timeout.as_secs(),
                })
            }
        }
    }
}
