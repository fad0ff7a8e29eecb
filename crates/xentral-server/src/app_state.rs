use std::sync::Arc;

use chrono::{DateTime, Utc};

use xentral_mcp::ProtocolEngine;
use xentral_tools::SharedConfig;

/// Shared application state with injected dependencies.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ProtocolEngine>,
    pub api_config: SharedConfig,
    pub options: ServerOptions,
    pub started_at: DateTime<Utc>,
}

/// Runtime switches that affect request handling.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerOptions {
    pub debug: bool,
    pub log_requests: bool,
}

impl AppState {
    pub fn new(engine: Arc<ProtocolEngine>, api_config: SharedConfig, options: ServerOptions) -> Self {
        Self {
            engine,
            api_config,
            options,
            started_at: Utc::now(),
        }
    }
}
