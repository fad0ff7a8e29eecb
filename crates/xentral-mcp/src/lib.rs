pub mod engine;
pub mod jsonrpc;
pub mod protocol;
pub mod registry;
pub mod schema;

pub use engine::{EngineError, ProtocolEngine, ServerStatus};
pub use jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RequestError, RequestId};
pub use protocol::{ServerInfo, PROTOCOL_VERSION};
pub use registry::{ToolBinding, ToolRegistry};
pub use schema::{project, InputSchema, ToolListing};
