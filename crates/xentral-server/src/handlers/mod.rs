mod admin;
mod health;
mod mcp;

pub use admin::{list_tools, not_found, server_info, update_credentials};
pub use health::health;
pub use mcp::mcp_request;
