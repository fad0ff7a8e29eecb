pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, ToolError};
pub use traits::{Arguments, ExecutableTool};
pub use types::{ParamType, ToolDefinition, ToolParameter};
