use std::sync::Arc;

use tokio::sync::RwLock;

/// Default ERP API base URL.
pub const DEFAULT_API_URL: &str = "https://api.xentral.com";

/// Credentials shared between the HTTP admin surface and the tools.
pub type SharedConfig = Arc<RwLock<ApiConfig>>;

/// ERP API location and credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub api_url: String,
    pub api_key: String,
}

impl ApiConfig {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let mut config = Self {
            api_url: String::new(),
            api_key: String::new(),
        };
        config.update_credentials(api_url, api_key);
        config
    }

    /// Replace both credentials; a trailing `/` on the URL is dropped.
    pub fn update_credentials(&mut self, api_url: impl Into<String>, api_key: impl Into<String>) {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self.api_key = api_key.into();
    }

    /// URL and key are both set.
    pub fn is_configured(&self) -> bool {
        !self.api_url.is_empty() && !self.api_key.is_empty()
    }

    /// Problems that would prevent API calls from succeeding.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.api_url.is_empty() {
            errors.push("XENTRAL_API_URL is required".to_string());
        } else if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            errors.push("XENTRAL_API_URL must start with http:// or https://".to_string());
        }

        if self.api_key.is_empty() {
            errors.push("XENTRAL_API_KEY is required".to_string());
        } else if self.api_key.chars().count() < 10 {
            errors.push("XENTRAL_API_KEY appears to be too short".to_string());
        }

        errors
    }

    /// Key representation safe for logs and info endpoints.
    pub fn masked_key(&self) -> &'static str {
        if self.api_key.is_empty() {
            "not_configured"
        } else {
            "***"
        }
    }

    pub fn into_shared(self) -> SharedConfig {
        Arc::new(RwLock::new(self))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, "")
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &self.masked_key())
            .finish()
    }
}
