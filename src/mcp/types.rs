//! JSON-RPC 2.0 envelope types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RpcErrorCode;

pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC response. Exactly one of `result` and `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: Value,
}

/// JSON-RPC error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn error(id: Value, code: RpcErrorCode, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: None,
            error: Some(JsonRpcError {
                code: code.code(),
                message: message.into(),
            }),
            id,
        }
    }
}

/// A request: carries an id that must be echoed back verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub id: Value,
    pub method: String,
    pub params: Value,
}

/// An inbound message after classification.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Request(Request),
    /// No `id` key. Never answered.
    Notification { method: Option<String> },
    /// Has an `id` but no string `method`.
    Invalid { id: Value },
}

impl Message {
    /// Classify a decoded JSON object. The presence of the `id` key decides
    /// request versus notification, whatever its value.
    pub fn classify(mut object: Map<String, Value>) -> Self {
        let method = match object.remove("method") {
            Some(Value::String(method)) => Some(method),
            _ => None,
        };

        let Some(id) = object.remove("id") else {
            return Message::Notification { method };
        };

        match method {
            Some(method) => Message::Request(Request {
                id,
                method,
                params: object
                    .remove("params")
                    .unwrap_or_else(|| Value::Object(Map::new())),
            }),
            None => Message::Invalid { id },
        }
    }
}
