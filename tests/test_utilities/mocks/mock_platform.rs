use async_trait::async_trait;
use course_admin::prelude::*;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

type Reply = PlatformResult<ResponseEnvelope>;

/// Mock PlatformTransport with scripted replies per method and endpoint
///
/// Endpoints are given without the API root (`/products`, `/productinventory/inv-1`).
/// An unscripted request panics so a test never silently talks to nobody.
#[derive(Default, Clone)]
pub struct MockPlatform {
    routes: Arc<Mutex<HashMap<(HttpMethod, String), VecDeque<Reply>>>>,
    seen: Arc<Mutex<Vec<RequestDescriptor>>>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, method: HttpMethod, endpoint: &str, reply: Reply) -> Self {
        self.routes
            .lock()
            .unwrap()
            .entry((method, endpoint.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    pub fn ok(content: Value) -> Reply {
        Ok(ResponseEnvelope {
            status: 200,
            reason: "OK".to_string(),
            body: ResponseBody::Json(content),
        })
    }

    pub fn no_content() -> Reply {
        Ok(ResponseEnvelope {
            status: 204,
            reason: "No Content".to_string(),
            body: ResponseBody::Empty,
        })
    }

    pub fn status(status: u16, body: &str) -> Reply {
        Err(PlatformError::HttpStatus {
            status,
            reason: "Error".to_string(),
            body: body.to_string(),
        })
    }

    pub fn journal_failure() -> Reply {
        Self::status(500, "System.Exception: UpdateJournalItem failed")
    }

    /// Every request sent so far, as `METHOD endpoint`
    pub fn calls(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|request| format!("{} {}", request.method, endpoint_of(request)))
            .collect()
    }

    pub fn body_sent_to(&self, method: HttpMethod, endpoint: &str) -> Option<Value> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|request| request.method == method && endpoint_of(request) == endpoint)
            .and_then(|request| request.body.clone())
    }
}

fn endpoint_of(request: &RequestDescriptor) -> String {
    match request.path.find(PLATFORM_API_BASE_PATH) {
        Some(index) => request.path[index + PLATFORM_API_BASE_PATH.len()..].to_string(),
        None => request.path.clone(),
    }
}

#[async_trait]
impl PlatformTransport for MockPlatform {
    async fn send(&self, request: &RequestDescriptor) -> Reply {
        self.seen.lock().unwrap().push(request.clone());
        let endpoint = endpoint_of(request);
        self.routes
            .lock()
            .unwrap()
            .get_mut(&(request.method, endpoint.clone()))
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| panic!("unscripted request: {} {}", request.method, endpoint))
    }
}
