use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The only JSON-RPC version accepted on the wire.
pub const JSONRPC_VERSION: &str = "2.0";

/// Standard JSON-RPC error codes.
pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

/// Server-defined error codes.
pub const TOOL_NOT_FOUND: i32 = -32000;
pub const TOOL_EXECUTION_ERROR: i32 = -32001;

/// A JSON-RPC request id: a string or an integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(i64),
    /// Integers above `i64::MAX`.
    Unsigned(u64),
    String(String),
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Unsigned(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RequestId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<u64> for RequestId {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Self::Unsigned(value), Self::Number)
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for RequestId {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// A validated JSON-RPC 2.0 request.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    /// `None` when the field was absent, `Some(None)` when it was JSON `null`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Option<RequestId>>,
    pub method: String,
    /// Carried as-is; each method decides what shape it accepts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Build an outgoing request carrying an id.
    pub fn new(
        id: impl Into<RequestId>,
        method: impl Into<String>,
        params: Option<Map<String, Value>>,
    ) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(Some(id.into())),
            method: method.into(),
            params: params.map(Value::Object),
        }
    }

    /// Decode raw bytes into a request.
    ///
    /// # Errors
    ///
    /// [`RequestError::Parse`] when the bytes are not a JSON object,
    /// [`RequestError::Invalid`] when the envelope does not conform.
    pub fn parse(raw: &[u8]) -> Result<Self, RequestError> {
        let value: Value = serde_json::from_slice(raw)
            .map_err(|e| RequestError::Parse(format!("Invalid JSON: {e}")))?;

        let Value::Object(object) = value else {
            return Err(RequestError::Parse(
                "Request must be a JSON object".to_string(),
            ));
        };

        Self::from_object(object)
    }

    /// Validate an already-decoded JSON object as a request envelope.
    ///
    /// # Errors
    ///
    /// [`RequestError::Invalid`] carrying whatever id could be read.
    pub fn from_object(mut object: Map<String, Value>) -> Result<Self, RequestError> {
        let id = match object.remove("id") {
            None => None,
            Some(Value::Null) => Some(None),
            Some(value) => match serde_json::from_value::<RequestId>(value) {
                Ok(id) => Some(Some(id)),
                Err(_) => {
                    return Err(RequestError::invalid(
                        None,
                        "id must be a string or an integer",
                    ))
                }
            },
        };
        let echo = id.clone().flatten();

        match object.get("jsonrpc") {
            Some(Value::String(version)) if version == JSONRPC_VERSION => {}
            _ => return Err(RequestError::invalid(echo, "jsonrpc field must be '2.0'")),
        }

        let method = match object.remove("method") {
            Some(Value::String(method)) => method,
            Some(_) => return Err(RequestError::invalid(echo, "method field must be a string")),
            None => return Err(RequestError::invalid(echo, "method field is required")),
        };

        let params = object.remove("params").filter(|params| !params.is_null());

        Ok(Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method,
            params,
        })
    }

    /// Whether the request carried an `id` field at all (null included).
    pub fn has_id(&self) -> bool {
        self.id.is_some()
    }

    /// The id to echo in the response; `None` encodes as `null`.
    pub fn response_id(&self) -> Option<RequestId> {
        self.id.clone().flatten()
    }

    /// Notification methods are recognised by name, regardless of the id.
    pub fn is_notification(&self) -> bool {
        self.method.starts_with("notifications/")
    }
}

/// Envelope failure detected before routing.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("{0}")]
    Parse(String),

    #[error("{reason}")]
    Invalid {
        id: Option<RequestId>,
        reason: &'static str,
    },
}

impl RequestError {
    fn invalid(id: Option<RequestId>, reason: &'static str) -> Self {
        Self::Invalid { id, reason }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Parse(_) => PARSE_ERROR,
            Self::Invalid { .. } => INVALID_REQUEST,
        }
    }

    /// Convert into the error response sent back to the client.
    pub fn into_response(self) -> JsonRpcResponse {
        let code = self.code();
        let message = self.to_string();
        let id = match self {
            Self::Parse(_) => None,
            Self::Invalid { id, .. } => id,
        };
        JsonRpcResponse::error(id, code, message)
    }
}

/// A JSON-RPC 2.0 response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<RequestId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<RequestId>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<RequestId>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// Create an error response with a structured `data` payload.
    pub fn error_with_data(
        id: Option<RequestId>,
        code: i32,
        message: impl Into<String>,
        data: Value,
    ) -> Self {
        let mut response = Self::error(id, code, message);
        if let Some(error) = response.error.as_mut() {
            error.data = Some(data);
        }
        response
    }

    /// Split the response into its result or error.
    ///
    /// # Errors
    ///
    /// Returns the carried [`JsonRpcError`] for error responses.
    pub fn into_result(self) -> Result<Value, JsonRpcError> {
        match (self.result, self.error) {
            (_, Some(error)) => Err(error),
            (Some(result), None) => Ok(result),
            (None, None) => Ok(Value::Null),
        }
    }
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl std::fmt::Display for JsonRpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for JsonRpcError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_request() {
        let json = br#"{
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/list",
            "params": null
        }"#;
        let req = JsonRpcRequest::parse(json).unwrap();
        assert_eq!(req.method, "tools/list");
        assert_eq!(req.response_id(), Some(RequestId::Number(1)));
        assert!(req.params.is_none());
    }

    #[test]
    fn request_with_params() {
        let json = br#"{
            "jsonrpc": "2.0",
            "id": "abc",
            "method": "tools/call",
            "params": {
                "name": "search_customers",
                "arguments": {
                    "city": "Berlin",
                    "limit": 5
                }
            }
        }"#;
        let req = JsonRpcRequest::parse(json).unwrap();
        assert_eq!(req.method, "tools/call");
        assert_eq!(req.response_id(), Some(RequestId::from("abc")));

        let params = req.params.unwrap();
        assert_eq!(params["name"], "search_customers");
        assert_eq!(params["arguments"]["city"], "Berlin");
    }

    #[test]
    fn absent_and_null_id_are_distinguished() {
        let absent = JsonRpcRequest::parse(br#"{"jsonrpc":"2.0","method":"ping"}"#).unwrap();
        assert!(!absent.has_id());
        assert!(absent.response_id().is_none());

        let null = JsonRpcRequest::parse(br#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#).unwrap();
        assert!(null.has_id());
        assert!(null.response_id().is_none());
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = JsonRpcRequest::parse(b"{not json").unwrap_err();
        assert_eq!(err.code(), PARSE_ERROR);
        assert!(err.to_string().starts_with("Invalid JSON"));
    }

    #[test]
    fn non_object_is_parse_error() {
        let err = JsonRpcRequest::parse(b"[1, 2, 3]").unwrap_err();
        assert_eq!(err.code(), PARSE_ERROR);
        assert_eq!(err.to_string(), "Request must be a JSON object");
    }

    #[test]
    fn wrong_version_is_invalid_request_with_id() {
        let err = JsonRpcRequest::parse(br#"{"jsonrpc":"1.0","id":9,"method":"initialize"}"#)
            .unwrap_err();
        assert_eq!(err.code(), INVALID_REQUEST);

        let resp = err.into_response();
        assert_eq!(resp.id, Some(RequestId::Number(9)));
        assert_eq!(resp.error.unwrap().code, INVALID_REQUEST);
    }

    #[test]
    fn missing_method_is_invalid_request() {
        let err = JsonRpcRequest::parse(br#"{"jsonrpc":"2.0","id":"x"}"#).unwrap_err();
        assert_eq!(err.code(), INVALID_REQUEST);
        assert_eq!(err.to_string(), "method field is required");
    }

    #[test]
    fn unusable_id_is_invalid_request_without_id() {
        let err = JsonRpcRequest::parse(br#"{"jsonrpc":"2.0","id":true,"method":"initialize"}"#)
            .unwrap_err();
        let resp = err.into_response();
        assert!(resp.id.is_none());
        assert_eq!(resp.error.unwrap().code, INVALID_REQUEST);
    }

    #[test]
    fn non_object_params_pass_envelope_validation() {
        let req = JsonRpcRequest::parse(br#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":[]}"#)
            .unwrap();
        assert_eq!(req.params, Some(serde_json::json!([])));
    }

    #[test]
    fn large_integer_id_is_kept() {
        let req = JsonRpcRequest::parse(
            br#"{"jsonrpc":"2.0","id":18446744073709551615,"method":"tools/list"}"#,
        )
        .unwrap();
        assert_eq!(req.response_id(), Some(RequestId::Unsigned(u64::MAX)));

        let resp = JsonRpcResponse::success(req.response_id(), serde_json::json!({}));
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains(r#""id":18446744073709551615"#));
    }

    #[test]
    fn small_unsigned_ids_stay_signed() {
        assert_eq!(RequestId::from(5_u64), RequestId::Number(5));
        assert_eq!(RequestId::from(u64::MAX), RequestId::Unsigned(u64::MAX));
    }

    #[test]
    fn notification_by_method_name() {
        let req = JsonRpcRequest::parse(
            br#"{"jsonrpc":"2.0","id":3,"method":"notifications/initialized"}"#,
        )
        .unwrap();
        assert!(req.is_notification());
    }

    #[test]
    fn success_response_omits_error() {
        let resp = JsonRpcResponse::success(
            Some(RequestId::Number(1)),
            serde_json::json!({"tools": []}),
        );
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"jsonrpc":"2.0","id":1,"result":{"tools":[]}}"#);
    }

    #[test]
    fn error_response_keeps_null_id() {
        let resp = JsonRpcResponse::error(None, PARSE_ERROR, "Invalid JSON");
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(
            json,
            r#"{"jsonrpc":"2.0","id":null,"error":{"code":-32700,"message":"Invalid JSON"}}"#
        );
    }

    #[test]
    fn error_with_data() {
        let resp = JsonRpcResponse::error_with_data(
            Some(RequestId::from("a")),
            TOOL_EXECUTION_ERROR,
            "boom",
            serde_json::json!({"tool": "explode"}),
        );
        let err = resp.into_result().unwrap_err();
        assert_eq!(err.code, TOOL_EXECUTION_ERROR);
        assert_eq!(err.data.unwrap()["tool"], "explode");
    }

    #[test]
    fn outgoing_request_serializes_id() {
        let req = JsonRpcRequest::new(7_i64, "tools/list", None);
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"jsonrpc":"2.0","id":7,"method":"tools/list"}"#);
    }
}
