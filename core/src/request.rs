//! Per-call request resolution: header merge and path substitution.

use std::collections::BTreeMap;

use crate::config::{CallOptions, CallerConfig};

/// URL and header set computed for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
}

impl ResolvedRequest {
    /// Pure: neither `config` nor `options` is modified.
    pub fn resolve(config: &CallerConfig, options: &CallOptions) -> Self {
        let endpoint = substitute_path_params(config.endpoint(), &options.path_params);
        Self {
            url: format!("{}/{}", config.base_url(), endpoint),
            headers: merge_headers(config.default_headers(), &options.headers),
        }
    }

    /// Header pairs in sorted-name order.
    pub fn header_pairs(&self) -> Vec<(String, String)> {
        self.headers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// Copies `defaults` and applies `overrides` on top; an override wins on an
/// identical key.
pub fn merge_headers(
    defaults: &BTreeMap<String, String>,
    overrides: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut headers = defaults.clone();
    for (name, value) in overrides {
        headers.insert(name.clone(), value.clone());
    }
    headers
}

/// Replaces every literal `:key` in `template` with its value.
///
/// Plain text replacement: a key that prefixes another placeholder (`:id`
/// vs `:idx`) also rewrites part of the longer one. Placeholders with no
/// matching key stay as they are.
pub fn substitute_path_params(template: &str, params: &BTreeMap<String, String>) -> String {
    let mut endpoint = template.to_string();
    for (key, value) in params {
        endpoint = endpoint.replace(&format!(":{key}"), value);
    }
    endpoint
}
