//! Typed GET/POST callers for JSON REST endpoints.
//!
//! # Overview
//! A caller is bound to one base URL and endpoint template. Each call merges
//! default and per-call headers, substitutes `:name` path parameters, sends
//! the request through a caller-supplied `Transport`, decodes the JSON body
//! into the declared response type, and optionally checks that the body
//! carries an expected set of fields (the base success response).
//!
//! # Design
//! - Callers hold only immutable configuration; calls share no state.
//! - The network stays behind the `Transport` trait. `UreqTransport`
//!   (feature `ureq`, on by default) is the bundled implementation.
//! - Every call takes a `CallContext` whose cancellation token and deadline
//!   bound the exchange and the body read.
//! - Base success response values are compared by their text form, so `1`
//!   and `"1"` match. See `validate::render`.
//! - No retries, no fallbacks and no error logging: every failure is returned
//!   as a `CallError`.

pub mod client;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod request;
pub mod validate;
#[cfg(feature = "ureq")]
pub mod ureq_transport;

pub use client::{GetCaller, PostCaller};
pub use config::{CallOptions, CallerConfig, CallerOptions};
pub use context::CallContext;
pub use error::{CallError, DecodeTarget, ErrorKind, TransportError};
pub use http::{HttpMethod, HttpRequest, RawResponse, Transport, TransportResponse};
pub use request::ResolvedRequest;
#[cfg(feature = "ureq")]
pub use ureq_transport::{UreqResponse, UreqTransport, UreqTransportError};

pub use tokio_util::sync::CancellationToken;
