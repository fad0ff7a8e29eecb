//! ERP-backed tool implementations and the discovery step that registers them.

pub mod args;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod placeholder;
pub mod search;

pub use catalog::register_default_tools;
pub use client::XentralClient;
pub use config::{ApiConfig, SharedConfig};
pub use error::Error;
pub use placeholder::PlaceholderTool;
pub use search::SearchTool;
