//! In-process `Transport` used by the caller tests.
//!
//! Records every request it receives and answers according to a fixed
//! `Behavior`, so tests can drive each failure branch of a call.

#![allow(dead_code)]

use std::sync::Mutex;

use httpcaller::{HttpRequest, Transport, TransportResponse};

pub const DEFAULT_BODY: &str = r#"{"test": "data", "status": "error"}"#;
pub const POST_BODY: &str = r#"{"id":1,"title":"foo","body":"bar","userId":1}"#;

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct MockError(&'static str);

#[derive(Debug, Clone)]
pub enum Behavior {
    /// Answer 200 with this body.
    Respond(&'static str),
    /// Answer with the given status and body.
    Status(u16, &'static str),
    /// Fail the exchange.
    NetworkError,
    /// Succeed the exchange, fail the body read.
    ReadError,
    /// Never complete the exchange.
    Hang,
    /// Complete the exchange, never finish the body read.
    HangBody,
}

pub struct MockTransport {
    behavior: Behavior,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn responding(body: &'static str) -> Self {
        Self::new(Behavior::Respond(body))
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("no request was sent")
    }
}

pub struct MockResponse {
    status: u16,
    body: Option<&'static str>,
    hang: bool,
}

impl MockResponse {
    fn ok(status: u16, body: &'static str) -> Self {
        Self {
            status,
            body: Some(body),
            hang: false,
        }
    }
}

impl Transport for MockTransport {
    type Error = MockError;
    type Response = MockResponse;

    async fn execute(&self, request: HttpRequest) -> Result<MockResponse, MockError> {
        self.requests.lock().unwrap().push(request);
        match self.behavior {
            Behavior::Respond(body) => Ok(MockResponse::ok(200, body)),
            Behavior::Status(status, body) => Ok(MockResponse::ok(status, body)),
            Behavior::NetworkError => Err(MockError("network error")),
            Behavior::ReadError => Ok(MockResponse {
                status: 200,
                body: None,
                hang: false,
            }),
            Behavior::Hang => std::future::pending().await,
            Behavior::HangBody => Ok(MockResponse {
                status: 200,
                body: None,
                hang: true,
            }),
        }
    }
}

impl TransportResponse for MockResponse {
    type Error = MockError;

    fn status(&self) -> u16 {
        self.status
    }

    async fn into_body(self) -> Result<Vec<u8>, MockError> {
        if self.hang {
            return std::future::pending().await;
        }
        match self.body {
            Some(body) => Ok(body.as_bytes().to_vec()),
            None => Err(MockError("read error")),
        }
    }
}
