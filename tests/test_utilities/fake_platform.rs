//! A throwaway HTTP peer on 127.0.0.1 that answers each connection with
//! one canned byte stream and records what it received.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// e.g. `POST /DesktopModules/Hotcakes/API/rest/v1/products?key=k HTTP/1.1`
    pub request_line: String,
    pub headers: Vec<String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        let prefix = format!("{}:", name.to_lowercase());
        self.headers
            .iter()
            .find(|line| line.to_lowercase().starts_with(&prefix))
            .map(|line| line[prefix.len()..].trim())
    }
}

pub struct FakePlatform {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakePlatform {
    /// Serves `responses` in order, one per connection, then stops accepting.
    pub fn serve(responses: Vec<String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = requests.clone();
        thread::spawn(move || {
            for response in responses {
                let Ok((stream, _)) = listener.accept() else {
                    return;
                };
                handle(stream, &response, &recorded);
            }
        });

        Self { addr, requests }
    }

    /// Site base URL to put in the settings
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_lines(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|request| request.request_line)
            .collect()
    }
}

fn handle(stream: TcpStream, response: &str, recorded: &Mutex<Vec<RecordedRequest>>) {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }

    let mut headers = Vec::new();
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let line = line.trim_end().to_string();
        if line.is_empty() {
            break;
        }
        if let Some(value) = line.to_lowercase().strip_prefix("content-length:") {
            content_length = value.trim().parse().unwrap_or(0);
        }
        headers.push(line);
    }

    let mut body = vec![0u8; content_length];
    let _ = reader.read_exact(&mut body);

    recorded.lock().unwrap().push(RecordedRequest {
        request_line: request_line.trim_end().to_string(),
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let mut stream = reader.into_inner();
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

/// `200 OK` with a Hotcakes envelope around `content`
pub fn ok_envelope(content: &str) -> String {
    let body = format!(r#"{{"Errors":[],"Content":{}}}"#, content);
    raw_response("200 OK", &body)
}

pub fn no_content() -> String {
    "HTTP/1.1 204 No Content\r\n\r\n".to_string()
}

/// The 500 the platform sends when a write succeeded but its journal entry failed
pub fn journal_failure() -> String {
    raw_response(
        "500 Internal Server Error",
        r#"{"Message":"An error has occurred.","ExceptionMessage":"UpdateJournalItem failed"}"#,
    )
}

pub fn raw_response(status: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json; charset=utf-8\r\nContent-Length: {}\r\n\r\n{}",
        status,
        body.len(),
        body
    )
}
