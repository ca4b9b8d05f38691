//! GET and POST callers bound to one endpoint.
//!
//! # Design
//! A caller holds its transport and an immutable `CallerConfig`; nothing is
//! mutated after construction, so `&self` calls may run concurrently. Every
//! call runs the same linear pipeline and stops at the first failure:
//! resolve URL and headers, dispatch, decode into the declared type, then
//! check the base success response when one is configured.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{CallOptions, CallerConfig, CallerOptions};
use crate::context::CallContext;
use crate::dispatch::dispatch;
use crate::error::CallError;
use crate::http::{HttpMethod, HttpRequest, Transport};
use crate::request::ResolvedRequest;
use crate::validate::{check_base_success, decode};

const CONTENT_TYPE: &str = "Content-Type";
const APPLICATION_JSON: &str = "application/json";

/// Issues GET requests and decodes responses into `Res`.
#[derive(Debug)]
pub struct GetCaller<T, Res> {
    transport: T,
    config: CallerConfig,
    _response: PhantomData<fn() -> Res>,
}

impl<T: Transport, Res: DeserializeOwned> GetCaller<T, Res> {
    pub fn new(transport: T, base_url: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::with_options(transport, base_url, endpoint, CallerOptions::default())
    }

    pub fn with_options(
        transport: T,
        base_url: impl Into<String>,
        endpoint: impl Into<String>,
        options: CallerOptions,
    ) -> Self {
        Self {
            transport,
            config: CallerConfig::new(base_url, endpoint, options),
            _response: PhantomData,
        }
    }

    pub fn config(&self) -> &CallerConfig {
        &self.config
    }

    /// URL and headers this caller would send for `options`.
    pub fn resolve(&self, options: &CallOptions) -> ResolvedRequest {
        ResolvedRequest::resolve(&self.config, options)
    }

    pub async fn get(&self, ctx: &CallContext, options: CallOptions) -> Result<Res, CallError> {
        let resolved = self.resolve(&options);
        let headers = resolved.header_pairs();
        let request = HttpRequest::new(HttpMethod::Get, resolved.url, headers, None)?;

        let raw = dispatch(&self.transport, ctx, request).await?;
        let res = decode(&raw.body)?;
        check_base_success(self.config.base_success_response(), &raw.body)?;
        Ok(res)
    }
}

/// Issues POST requests with a JSON `Req` body and decodes responses into `Res`.
#[derive(Debug)]
pub struct PostCaller<T, Req, Res> {
    transport: T,
    config: CallerConfig,
    _types: PhantomData<fn(Req) -> Res>,
}

impl<T: Transport, Req: Serialize, Res: DeserializeOwned> PostCaller<T, Req, Res> {
    pub fn new(transport: T, base_url: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::with_options(transport, base_url, endpoint, CallerOptions::default())
    }

    pub fn with_options(
        transport: T,
        base_url: impl Into<String>,
        endpoint: impl Into<String>,
        options: CallerOptions,
    ) -> Self {
        Self {
            transport,
            config: CallerConfig::new(base_url, endpoint, options),
            _types: PhantomData,
        }
    }

    pub fn config(&self) -> &CallerConfig {
        &self.config
    }

    /// URL and headers this caller would send for `options`, before the
    /// JSON content type is forced.
    pub fn resolve(&self, options: &CallOptions) -> ResolvedRequest {
        ResolvedRequest::resolve(&self.config, options)
    }

    /// Sends `payload` as JSON.
    ///
    /// `Content-Type: application/json` is always sent; a default or
    /// per-call header of that name is replaced.
    pub async fn post(&self, ctx: &CallContext, payload: &Req, options: CallOptions) -> Result<Res, CallError> {
        let body = serde_json::to_vec(payload).map_err(CallError::Serialization)?;

        let resolved = self.resolve(&options);
        let mut headers: Vec<(String, String)> = resolved
            .header_pairs()
            .into_iter()
            .filter(|(name, _)| !name.eq_ignore_ascii_case(CONTENT_TYPE))
            .collect();
        headers.push((CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()));
        let request = HttpRequest::new(HttpMethod::Post, resolved.url, headers, Some(body))?;

        let raw = dispatch(&self.transport, ctx, request).await?;
        let res = decode(&raw.body)?;
        check_base_success(self.config.base_success_response(), &raw.body)?;
        Ok(res)
    }
}
