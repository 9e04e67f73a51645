//! MCP (Model Context Protocol) server over newline-delimited JSON-RPC.
//!
//! One line in, at most one line out. Requests are answered in arrival
//! order; notifications never get a response. Diagnostics go through
//! `tracing`, never to the protocol stream.

mod prompts;
mod resources;
mod tools;
pub mod types;

use std::any::Any;
use std::sync::Arc;

use serde_json::{json, Map, Value};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info, warn};

use crate::error::{Error, RpcErrorCode};
use crate::ports::inbound::{
    CalculationUseCase, FailureKind, FileOperationUseCase, NoteManagementUseCase,
    PromptGenerationUseCase, ResourceQueryUseCase, WeatherQueryUseCase,
};

pub use tools::Tool;
pub use types::{JsonRpcError, JsonRpcResponse, Message, Request};

/// MCP protocol version.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// Server info.
const SERVER_NAME: &str = "mcp-demo-server";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The input ports the server drives.
#[derive(Clone)]
pub struct UseCases {
    pub calculation: Arc<dyn CalculationUseCase>,
    pub notes: Arc<dyn NoteManagementUseCase>,
    pub weather: Arc<dyn WeatherQueryUseCase>,
    pub files: Arc<dyn FileOperationUseCase>,
    pub resources: Arc<dyn ResourceQueryUseCase>,
    pub prompts: Arc<dyn PromptGenerationUseCase>,
}

/// Methods the server answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Initialize,
    ToolsList,
    ToolsCall,
    ResourcesList,
    ResourcesRead,
    PromptsList,
    PromptsGet,
}

impl Method {
    fn parse(name: &str) -> Option<Self> {
        let method = match name {
            "initialize" => Method::Initialize,
            "tools/list" => Method::ToolsList,
            "tools/call" => Method::ToolsCall,
            "resources/list" => Method::ResourcesList,
            "resources/read" => Method::ResourcesRead,
            "prompts/list" => Method::PromptsList,
            "prompts/get" => Method::PromptsGet,
            _ => return None,
        };
        Some(method)
    }
}

/// A request that could not be served, rendered as a JSON-RPC error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HandlerError {
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid Request: {0}")]
    InvalidRequest(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("{message}")]
    Failed { kind: FailureKind, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Use-case failure, classified by kind.
    pub fn failed(kind: FailureKind, error: impl std::fmt::Display) -> Self {
        HandlerError::Failed {
            kind,
            message: error.to_string(),
        }
    }

    pub fn code(&self) -> RpcErrorCode {
        match self {
            HandlerError::MethodNotFound(_) => RpcErrorCode::MethodNotFound,
            HandlerError::InvalidRequest(_) => RpcErrorCode::InvalidRequest,
            HandlerError::InvalidParams(_) => RpcErrorCode::InvalidParams,
            HandlerError::Failed { kind, .. } => match kind {
                FailureKind::InvalidArgument => RpcErrorCode::InvalidParams,
                FailureKind::NotFound => RpcErrorCode::ResourceNotFound,
                FailureKind::Unavailable => RpcErrorCode::InternalError,
            },
            HandlerError::Internal(_) => RpcErrorCode::InternalError,
        }
    }
}

/// `params` as an object; absent params were already defaulted to `{}`.
fn params_object(params: &Value) -> Result<&Map<String, Value>, HandlerError> {
    params
        .as_object()
        .ok_or_else(|| HandlerError::InvalidParams("params must be an object".to_string()))
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {},
            "resources": {},
            "prompts": {}
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION
        }
    })
}

#[derive(Clone)]
struct Router {
    use_cases: Arc<UseCases>,
}

impl Router {
    async fn route(self, method: Method, params: Value) -> Result<Value, HandlerError> {
        let use_cases = &self.use_cases;
        match method {
            Method::Initialize => {
                info!("MCP initialize");
                Ok(initialize_result())
            }
            Method::ToolsList => Ok(tools::list()),
            Method::ToolsCall => tools::call(use_cases, &params).await,
            Method::ResourcesList => resources::list(use_cases),
            Method::ResourcesRead => resources::read(use_cases, &params),
            Method::PromptsList => Ok(prompts::list(use_cases)),
            Method::PromptsGet => prompts::get(use_cases, &params),
        }
    }
}

/// Stdio MCP server.
pub struct McpServer {
    router: Router,
}

impl McpServer {
    pub fn new(use_cases: UseCases) -> Self {
        Self {
            router: Router {
                use_cases: Arc::new(use_cases),
            },
        }
    }

    /// Serve until end of input. Read and write failures are fatal.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<(), Error>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Starting MCP server");

        let mut line = Vec::new();
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line).await? == 0 {
                break;
            }

            let Some(response) = self.handle_line(&line).await else {
                continue;
            };

            let mut encoded = serde_json::to_vec(&response)?;
            debug!(response = %String::from_utf8_lossy(&encoded), "MCP response");
            encoded.push(b'\n');
            writer.write_all(&encoded).await?;
            writer.flush().await?;
        }

        info!("MCP server stopped");
        Ok(())
    }

    /// Handle one raw input line. `None` means nothing is written back.
    pub async fn handle_line(&self, line: &[u8]) -> Option<JsonRpcResponse> {
        let text = match std::str::from_utf8(line) {
            Ok(text) => text.trim(),
            Err(e) => {
                warn!(error = %e, "Skipping line that is not valid UTF-8");
                return None;
            }
        };
        if text.is_empty() {
            return None;
        }

        debug!(request = %text, "MCP request");

        let object = match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(object)) => object,
            Ok(_) => {
                warn!(
                    code = RpcErrorCode::InvalidRequest.code(),
                    "Skipping message that is not a JSON object"
                );
                return None;
            }
            Err(e) => {
                warn!(
                    code = RpcErrorCode::ParseError.code(),
                    error = %e,
                    "Failed to parse MCP message"
                );
                return None;
            }
        };

        match Message::classify(object) {
            Message::Request(request) => Some(self.dispatch(request).await),
            Message::Notification { method } => {
                match method.as_deref() {
                    Some("notifications/initialized") => info!("Client initialized"),
                    other => debug!(method = ?other, "Ignoring notification"),
                }
                None
            }
            Message::Invalid { id } => {
                let e = HandlerError::InvalidRequest("method must be a string".to_string());
                warn!(%id, error = %e, "Rejecting request");
                Some(JsonRpcResponse::error(id, e.code(), e.to_string()))
            }
        }
    }

    /// Route a request on its own task so a panicking handler is contained.
    async fn dispatch(&self, request: Request) -> JsonRpcResponse {
        let Request { id, method, params } = request;

        let outcome = match Method::parse(&method) {
            None => Err(HandlerError::MethodNotFound(method.clone())),
            Some(parsed) => {
                debug!(method = %method, %id, "Dispatching request");
                match tokio::spawn(self.router.clone().route(parsed, params)).await {
                    Ok(outcome) => outcome,
                    Err(e) if e.is_panic() => {
                        Err(HandlerError::Internal(panic_message(e.into_panic())))
                    }
                    Err(e) => Err(HandlerError::Internal(e.to_string())),
                }
            }
        };

        match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => {
                match e.code() {
                    RpcErrorCode::InternalError => {
                        error!(method = %method, %id, error = %e, "Request failed")
                    }
                    _ => warn!(method = %method, %id, error = %e, "Request rejected"),
                }
                JsonRpcResponse::error(id, e.code(), e.to_string())
            }
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return message.to_string();
    }
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(_) => "handler panicked".to_string(),
    }
}
