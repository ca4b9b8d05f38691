//! `Transport` backed by a blocking [`ureq::Agent`].
//!
//! The exchange and the body read each run on tokio's blocking pool so that
//! cancellation can abandon them without stalling the caller. An abandoned
//! exchange keeps its thread until ureq's own timeout, if any, fires.

use std::time::Duration;

use ureq::http::Response;
use ureq::{Agent, Body};

use crate::http::{HttpMethod, HttpRequest, Transport, TransportResponse};

/// Failure of a ureq exchange or body read.
#[derive(Debug, thiserror::Error)]
pub enum UreqTransportError {
    #[error(transparent)]
    Ureq(#[from] ureq::Error),

    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Wraps a [`ureq::Agent`] that reports every HTTP status as a response.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Bounds every exchange, body read included, to `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::build(Some(timeout))
    }

    /// Uses `agent` as is. It should be configured with
    /// `http_status_as_error(false)`, or non-2xx statuses become transport
    /// errors.
    pub fn from_agent(agent: Agent) -> Self {
        Self { agent }
    }

    fn build(timeout: Option<Duration>) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

/// A ureq response whose body is still on the wire.
pub struct UreqResponse {
    inner: Response<Body>,
}

impl Transport for UreqTransport {
    type Error = UreqTransportError;
    type Response = UreqResponse;

    async fn execute(&self, request: HttpRequest) -> Result<UreqResponse, UreqTransportError> {
        let agent = self.agent.clone();
        let inner = tokio::task::spawn_blocking(move || send(&agent, request)).await??;
        Ok(UreqResponse { inner })
    }
}

impl TransportResponse for UreqResponse {
    type Error = UreqTransportError;

    fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    async fn into_body(self) -> Result<Vec<u8>, UreqTransportError> {
        let mut body = self.inner.into_body();
        let bytes = tokio::task::spawn_blocking(move || body.read_to_vec()).await??;
        Ok(bytes)
    }
}

fn send(agent: &Agent, request: HttpRequest) -> Result<Response<Body>, ureq::Error> {
    let (method, url, headers, body) = request.into_parts();
    match method {
        HttpMethod::Get => {
            let mut req = agent.get(&url);
            for (name, value) in &headers {
                req = req.header(name.as_str(), value.as_str());
            }
            req.call()
        }
        HttpMethod::Post => {
            let mut req = agent.post(&url);
            for (name, value) in &headers {
                req = req.header(name.as_str(), value.as_str());
            }
            let body = body.unwrap_or_default();
            req.send(&body[..])
        }
    }
}
