pub mod app_state;
pub mod config;
pub mod handlers;
pub mod router;

/// Name reported in `initialize` and on the info endpoints.
pub const SERVER_NAME: &str = "xentral-mcp-server";
