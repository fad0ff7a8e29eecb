use std::time::Duration;

use serde_json::Value;

use xentral_core::{Arguments, ToolError};

use crate::args::query_value;
use crate::config::SharedConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Join a base URL and a relative endpoint with exactly one `/`.
pub fn build_url(base: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// Query-string parameters in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(Vec<(String, String)>);

impl Query {
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// `page` -> `page[number]`, `per_page` (or `limit`) -> `page[size]`.
    pub fn pagination(&mut self, arguments: &Arguments) {
        if let Some(page) = arguments.get("page").and_then(query_value) {
            self.push("page[number]", page);
        }
        let size = arguments
            .get("per_page")
            .or_else(|| arguments.get("limit"))
            .and_then(query_value);
        if let Some(size) = size {
            self.push("page[size]", size);
        }
    }

    pub fn sorting(&mut self, arguments: &Arguments) {
        if let Some(sort) = arguments.get("sort").and_then(query_value) {
            self.push("sort", sort);
        }
    }

    /// Map argument names onto `filter[<key>][value]` parameters.
    pub fn filters(&mut self, arguments: &Arguments, mapping: &[(&str, &str)]) {
        for (arg, key) in mapping {
            if let Some(value) = arguments.get(*arg).and_then(query_value) {
                self.push(format!("filter[{key}][value]"), value);
            }
        }
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

/// Thin HTTP client for the ERP REST API.
#[derive(Clone)]
pub struct XentralClient {
    http: reqwest::Client,
    config: SharedConfig,
}

impl XentralClient {
    /// # Errors
    ///
    /// Fails when the underlying HTTP client cannot be constructed.
    pub fn new(config: SharedConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("xentral-mcp-server/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    /// GET an endpoint and return its JSON payload.
    ///
    /// Non-JSON bodies are wrapped as `{"text": <body>}`.
    ///
    /// # Errors
    ///
    /// [`ToolError::NotConfigured`] without credentials, [`ToolError::Upstream`]
    /// for non-success statuses, [`ToolError::Request`] for transport failures.
    pub async fn get(&self, endpoint: &str, query: &Query) -> Result<Value, ToolError> {
        let (url, api_key) = {
            let config = self.config.read().await;
            if !config.is_configured() {
                return Err(ToolError::NotConfigured(
                    "XENTRAL_API_URL and XENTRAL_API_KEY must be set".to_string(),
                ));
            }
            (build_url(&config.api_url, endpoint), config.api_key.clone())
        };

        tracing::debug!(%url, params = query.pairs().len(), "ERP request");

        let resp = self
            .http
            .get(&url)
            .bearer_auth(api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(query.pairs())
            .send()
            .await
            .map_err(|e| ToolError::Request(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ToolError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(ToolError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body).unwrap_or_else(|_| serde_json::json!({ "text": body })))
    }
}
