//! HTTP transport seam.
//!
//! # Design
//! The core never talks to the network itself. It hands a validated
//! `HttpRequest` to a caller-supplied `Transport` and reads the body back
//! through `TransportResponse`. Requests are plain data with owned fields so
//! any HTTP client can execute them; `UreqTransport` is the bundled one.
//!
//! `TransportResponse::into_body` consumes the response, so the body stream
//! is drained and released on every path, including when the read future is
//! dropped on cancellation.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use ::http::header::{HeaderName, HeaderValue};
use ::http::Uri;

use crate::error::CallError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "get"),
            HttpMethod::Post => write!(f, "post"),
        }
    }
}

/// An outbound HTTP request described as plain data.
///
/// Only constructible through `HttpRequest::new`, which rejects URLs that are
/// not absolute and header names or values that HTTP cannot carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    method: HttpMethod,
    url: String,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn new(
        method: HttpMethod,
        url: String,
        headers: Vec<(String, String)>,
        body: Option<Vec<u8>>,
    ) -> Result<Self, CallError> {
        let uri: Uri = url
            .parse()
            .map_err(|e| CallError::construction_with(format!("invalid url `{url}`"), e))?;
        if uri.scheme().is_none() || uri.authority().is_none() {
            return Err(CallError::construction(format!(
                "url `{url}` must be absolute"
            )));
        }

        for (name, value) in &headers {
            HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| CallError::construction_with(format!("invalid header name `{name}`"), e))?;
            HeaderValue::from_str(value).map_err(|e| {
                CallError::construction_with(format!("invalid value for header `{name}`"), e)
            })?;
        }

        Ok(Self {
            method,
            url,
            headers,
            body,
        })
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Case-insensitive lookup of the first header named `name`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    pub fn into_parts(self) -> (HttpMethod, String, Vec<(String, String)>, Option<Vec<u8>>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Executes HTTP requests on behalf of a caller.
///
/// Implementations must be safe to share between concurrent calls. Non-2xx
/// statuses are responses, not errors.
pub trait Transport: Send + Sync {
    /// Error for a failed exchange.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Response handle returned by a successful exchange.
    type Response: TransportResponse;

    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send;
}

/// A response whose body has not been read yet.
pub trait TransportResponse: Send {
    /// Error for a failed body read.
    type Error: std::error::Error + Send + Sync + 'static;

    fn status(&self) -> u16;

    /// Consumes the response and reads the whole body.
    fn into_body(self) -> impl Future<Output = Result<Vec<u8>, Self::Error>> + Send;
}

impl<T: Transport> Transport for &T {
    type Error = T::Error;
    type Response = T::Response;

    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send {
        (**self).execute(request)
    }
}

impl<T: Transport> Transport for Arc<T> {
    type Error = T::Error;
    type Response = T::Response;

    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send {
        (**self).execute(request)
    }
}

/// Status and fully read body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}
