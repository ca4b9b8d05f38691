//! Error types for GET and POST callers.
//!
//! # Design
//! Every failure a call can hit maps to exactly one `CallError` variant, in
//! the order the pipeline runs: serialize, build, dispatch, read, decode,
//! validate. Nothing is retried or recovered here; the caller decides what
//! to report. `ErrorKind` gives a flat tag for callers that only need to
//! branch on the category.

use std::fmt;

use crate::http::HttpMethod;

/// Boxed error used for transport and body-read causes.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by `GetCaller::get` and `PostCaller::post`.
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    /// The request payload could not be serialized to JSON. Nothing was sent.
    #[error("marshal request error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The resolved URL or a header could not form a valid outbound request.
    #[error("create request error: {reason}")]
    RequestConstruction {
        reason: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The transport could not complete the exchange, or the call was
    /// cancelled or ran past its deadline.
    #[error("{method} request error: {source}")]
    Transport {
        method: HttpMethod,
        #[source]
        source: TransportError,
    },

    /// The exchange succeeded but the response body could not be fully read.
    #[error("read response error: {0}")]
    BodyRead(#[source] BoxError),

    /// The response bytes did not decode into the declared response type or
    /// into the map used for base success response checks.
    #[error("unmarshal {target} error: {source}")]
    Decode {
        target: DecodeTarget,
        #[source]
        source: serde_json::Error,
    },

    /// A base success response key was missing or held a different value.
    #[error("unsuccessful response for key {key}: expected {expected}, got {}", .actual.as_deref().unwrap_or("missing"))]
    Validation {
        key: String,
        expected: String,
        actual: Option<String>,
    },
}

impl CallError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CallError::Serialization(_) => ErrorKind::Serialization,
            CallError::RequestConstruction { .. } => ErrorKind::RequestConstruction,
            CallError::Transport { .. } => ErrorKind::Transport,
            CallError::BodyRead(_) => ErrorKind::BodyRead,
            CallError::Decode { .. } => ErrorKind::Decode,
            CallError::Validation { .. } => ErrorKind::Validation,
        }
    }

    pub(crate) fn construction(reason: impl Into<String>) -> Self {
        CallError::RequestConstruction {
            reason: reason.into(),
            source: None,
        }
    }

    pub(crate) fn construction_with<E>(reason: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CallError::RequestConstruction {
            reason: reason.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Flat category of a `CallError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Serialization,
    RequestConstruction,
    Transport,
    BodyRead,
    Decode,
    Validation,
}

/// Why the transport stage failed.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The call's cancellation token fired.
    #[error("context canceled")]
    Cancelled,

    /// The call's deadline passed before the exchange finished.
    #[error("context deadline exceeded")]
    DeadlineExceeded,

    /// The underlying transport reported a failure.
    #[error(transparent)]
    Failed(BoxError),
}

/// Which of the two response decodes failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeTarget {
    /// Decoding into the caller's declared response type.
    Response,
    /// Decoding into the generic map checked against the base success response.
    ResponseMap,
}

impl fmt::Display for DecodeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeTarget::Response => write!(f, "response"),
            DecodeTarget::ResponseMap => write!(f, "response map"),
        }
    }
}
