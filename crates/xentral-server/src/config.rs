use clap::{ArgAction, Parser};

use xentral_tools::config::DEFAULT_API_URL;
use xentral_tools::ApiConfig;

use crate::app_state::ServerOptions;

/// Server configuration from flags and environment.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "xentral-mcp-server",
    version,
    about = "MCP HTTP server exposing Xentral ERP tools"
)]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, env = "MCP_SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "MCP_SERVER_PORT", default_value_t = 8888)]
    pub port: u16,

    /// Verbose logging when `RUST_LOG` is not set
    #[arg(long, env = "MCP_DEBUG")]
    pub debug: bool,

    /// Log the method and tool name of every MCP request
    #[arg(long, env = "LOG_REQUESTS", default_value_t = true, action = ArgAction::Set)]
    pub log_requests: bool,

    /// Xentral API base URL
    #[arg(long, env = "XENTRAL_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Xentral API key
    #[arg(long, env = "XENTRAL_API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    /// Also advertise planned tools backed by placeholder implementations
    #[arg(long, env = "MCP_INCLUDE_PLANNED")]
    pub include_planned: bool,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(&self.api_url, &self.api_key)
    }

    pub fn options(&self) -> ServerOptions {
        ServerOptions {
            debug: self.debug,
            log_requests: self.log_requests,
        }
    }

    /// Default tracing filter when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}
