//! Static caller configuration and per-call options.
//!
//! # Design
//! All maps are `BTreeMap`s so header merge, path substitution and
//! expectation checks run in sorted-key order and produce the same result on
//! every call. Both option structs default to empty; an empty
//! `base_success_response` disables validation entirely.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// Optional settings fixed when a caller is constructed.
///
/// Deserializable so a caller's static setup can live in a JSON file; any
/// absent field is empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CallerOptions {
    pub default_headers: BTreeMap<String, String>,
    pub base_success_response: BTreeMap<String, Value>,
}

impl CallerOptions {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    pub fn expect(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.base_success_response.insert(key.into(), value.into());
        self
    }
}

/// Per-call overrides. `CallOptions::default()` means no overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallOptions {
    /// Applied on top of the caller's default headers; wins on collision.
    pub headers: BTreeMap<String, String>,
    /// Values substituted for `:name` placeholders in the endpoint template.
    pub path_params: BTreeMap<String, String>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.insert(name.into(), value.into());
        self
    }
}

/// Immutable state shared by every call a caller makes.
#[derive(Debug, Clone, PartialEq)]
pub struct CallerConfig {
    base_url: String,
    endpoint: String,
    default_headers: BTreeMap<String, String>,
    base_success_response: BTreeMap<String, Value>,
}

impl CallerConfig {
    pub fn new(base_url: impl Into<String>, endpoint: impl Into<String>, options: CallerOptions) -> Self {
        Self {
            base_url: base_url.into(),
            endpoint: endpoint.into(),
            default_headers: options.default_headers,
            base_success_response: options.base_success_response,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn default_headers(&self) -> &BTreeMap<String, String> {
        &self.default_headers
    }

    pub fn base_success_response(&self) -> &BTreeMap<String, Value> {
        &self.base_success_response
    }
}
