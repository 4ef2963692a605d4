use crate::shared::error::PlatformError;
use crate::shared::PlatformResult;

const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Status line of a parsed response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub status: u16,
    pub reason: String,
}

/// A fully received response: status line plus everything after the headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub reason: String,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug)]
enum ParserState {
    AwaitingHeaders { buffer: Vec<u8> },
    ReadingBody { status_line: StatusLine, body: Vec<u8> },
}

/// Incremental HTTP/1.x response parser.
///
/// Fed with raw chunks as they arrive. Headers are skipped once the blank
/// line is seen; the body is everything until the connection closes.
/// `Content-Length` and chunked framing are ignored on purpose, the remote
/// does not frame its replies reliably.
#[derive(Debug)]
pub struct ResponseParser {
    state: ParserState,
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseParser {
    pub fn new() -> Self {
        Self {
            state: ParserState::AwaitingHeaders { buffer: Vec::new() },
        }
    }

    /// Status line, once the header block has been seen
    pub fn status_line(&self) -> Option<&StatusLine> {
        match &self.state {
            ParserState::AwaitingHeaders { .. } => None,
            ParserState::ReadingBody { status_line, .. } => Some(status_line),
        }
    }

    /// Consumes the next chunk of bytes from the connection.
    ///
    /// # Errors
    /// Returns a framing error when the header block is complete but the
    /// status line does not match `HTTP/1.0|1.1 <3 digits> [reason]`.
    pub fn feed(&mut self, chunk: &[u8]) -> PlatformResult<()> {
        match &mut self.state {
            ParserState::ReadingBody { body, .. } => {
                body.extend_from_slice(chunk);
                Ok(())
            }
            ParserState::AwaitingHeaders { buffer } => {
                buffer.extend_from_slice(chunk);
                let Some(split) = find_subsequence(buffer, HEADER_TERMINATOR) else {
                    return Ok(());
                };

                let head = String::from_utf8_lossy(&buffer[..split]).into_owned();
                let status_line = parse_status_line(head.lines().next().unwrap_or_default())?;
                let body = buffer[split + HEADER_TERMINATOR.len()..].to_vec();
                self.state = ParserState::ReadingBody { status_line, body };
                Ok(())
            }
        }
    }

    /// Completes parsing when the connection has closed.
    ///
    /// # Errors
    /// Returns a framing error if no status line was ever parsed.
    pub fn finish(self) -> PlatformResult<RawResponse> {
        match self.state {
            ParserState::AwaitingHeaders { buffer } => Err(PlatformError::Framing {
                details: format!(
                    "connection closed before the status line was received ({} bytes read)",
                    buffer.len()
                ),
            }),
            ParserState::ReadingBody { status_line, body } => Ok(RawResponse {
                status: status_line.status,
                reason: status_line.reason,
                body,
            }),
        }
    }
}

/// Strict status line check: `HTTP/1.0` or `HTTP/1.1`, a 3-digit code, optional reason.
pub fn parse_status_line(line: &str) -> PlatformResult<StatusLine> {
    let framing = || PlatformError::Framing {
        details: format!("invalid status line: {:?}", line),
    };

    let rest = line
        .strip_prefix("HTTP/1.1 ")
        .or_else(|| line.strip_prefix("HTTP/1.0 "))
        .ok_or_else(framing)?;

    let code = rest.get(..3).ok_or_else(framing)?;
    if !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(framing());
    }
    let reason = match &rest[3..] {
        "" => "",
        tail => tail.strip_prefix(' ').ok_or_else(framing)?,
    };

    Ok(StatusLine {
        status: code.parse().map_err(|_| framing())?,
        reason: reason.trim().to_string(),
    })
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_line_variants() {
        let line = parse_status_line("HTTP/1.1 200 OK").unwrap();
        assert_eq!(line.status, 200);
        assert_eq!(line.reason, "OK");

        let line = parse_status_line("HTTP/1.0 500 Internal Server Error").unwrap();
        assert_eq!(line.status, 500);
        assert_eq!(line.reason, "Internal Server Error");

        let line = parse_status_line("HTTP/1.1 204").unwrap();
        assert_eq!(line.status, 204);
        assert_eq!(line.reason, "");
    }

    #[test]
    fn test_parse_status_line_rejects_malformed() {
        for line in [
            "HTTP/2 200 OK",
            "HTTP/1.1 20 OK",
            "HTTP/1.1 2000 OK",
            "HTTP/1.1 abc OK",
            "http/1.1 200 OK",
            "garbage",
            "",
        ] {
            assert!(
                matches!(parse_status_line(line), Err(PlatformError::Framing { .. })),
                "expected framing error for {:?}",
                line
            );
        }
    }

    #[test]
    fn test_feed_across_chunk_boundaries() {
        let mut parser = ResponseParser::new();
        parser.feed(b"HTTP/1.1 200 OK\r\nContent-Ty").unwrap();
        assert!(parser.status_line().is_none());
        parser.feed(b"pe: application/json\r\n\r").unwrap();
        assert!(parser.status_line().is_none());
        parser.feed(b"\n{\"Content\":").unwrap();
        assert_eq!(parser.status_line().unwrap().status, 200);
        parser.feed(b"1}").unwrap();

        let response = parser.finish().unwrap();
        assert_eq!(response.body_text(), "{\"Content\":1}");
    }

    #[test]
    fn test_body_ignores_content_length() {
        let mut parser = ResponseParser::new();
        parser
            .feed(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\n{\"a\":true}")
            .unwrap();
        assert_eq!(parser.finish().unwrap().body_text(), "{\"a\":true}");
    }

    #[test]
    fn test_finish_without_headers_is_framing_error() {
        let mut parser = ResponseParser::new();
        parser.feed(b"HTTP/1.1 200 OK\r\nServer: x\r\n").unwrap();
        assert!(matches!(
            parser.finish(),
            Err(PlatformError::Framing { .. })
        ));
        assert!(matches!(
            ResponseParser::new().finish(),
            Err(PlatformError::Framing { .. })
        ));
    }

    #[test]
    fn test_malformed_status_line_fails_on_feed() {
        let mut parser = ResponseParser::new();
        let result = parser.feed(b"HTTP/1.1 OK\r\n\r\n{}");
        assert!(matches!(result, Err(PlatformError::Framing { .. })));
    }
}
