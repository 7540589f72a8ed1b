// JSON-RPC 2.0 server over newline-delimited stdio

use crate::error::TicketmasterError;
use crate::tools::{tool_definitions, ToolHandler};
use crate::transport::HttpTransport;
use rmcp::model::ErrorCode;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info, warn};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "ticketmaster";

const JSONRPC_VERSION: &str = "2.0";

#[derive(Debug, Deserialize)]
struct RpcRequest {
    #[serde(default)]
    jsonrpc: Option<String>,
    #[serde(default)]
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Default, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

pub struct McpServer<T: HttpTransport> {
    tools: ToolHandler<T>,
}

impl<T: HttpTransport> McpServer<T> {
    pub fn new(tools: ToolHandler<T>) -> Self {
        Self { tools }
    }

    /// Serves requests line by line until the reader hits EOF.
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Ticketmaster MCP server running on stdio");
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(response) = self.handle_line(&line).await {
                let mut frame = response.to_string();
                frame.push('\n');
                writer.write_all(frame.as_bytes()).await?;
                writer.flush().await?;
            }
        }
        info!("Input closed, shutting down");
        Ok(())
    }

    /// Returns the response frame for one message, or `None` for notifications.
    pub async fn handle_line(&self, line: &str) -> Option<Value> {
        let raw: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "Unparseable message");
                return Some(error_response(
                    Value::Null,
                    ErrorCode::PARSE_ERROR,
                    format!("Parse error: {}", err),
                ));
            }
        };

        let request: RpcRequest = match serde_json::from_value(raw) {
            Ok(request) => request,
            Err(err) => {
                return Some(error_response(
                    Value::Null,
                    ErrorCode::INVALID_REQUEST,
                    format!("Invalid request: {}", err),
                ))
            }
        };

        if request.jsonrpc.as_deref() != Some(JSONRPC_VERSION) {
            warn!(method = %request.method, version = ?request.jsonrpc, "Unsupported JSON-RPC version");
            return Some(error_response(
                request.id.unwrap_or(Value::Null),
                ErrorCode::INVALID_REQUEST,
                format!("Invalid request: jsonrpc must be \"{}\"", JSONRPC_VERSION),
            ));
        }

        let id = match request.id {
            Some(id) if !id.is_null() => id,
            _ => {
                debug!(method = %request.method, "Notification received");
                return None;
            }
        };

        Some(match self.dispatch(&request.method, request.params).await {
            Ok(result) => json!({"jsonrpc": JSONRPC_VERSION, "id": id, "result": result}),
            Err((code, message)) => error_response(id, code, message),
        })
    }

    async fn dispatch(&self, method: &str, params: Value) -> Result<Value, (ErrorCode, String)> {
        match method {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {"tools": {}},
                "serverInfo": {"name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION")}
            })),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({"tools": tool_definitions()})),
            "tools/call" => {
                let call: CallParams = serde_json::from_value(params)
                    .map_err(|err| (ErrorCode::INVALID_PARAMS, format!("Invalid tools/call params: {}", err)))?;
                match self.tools.call_tool(&call.name, call.arguments).await {
                    Ok(result) => serde_json::to_value(result).map_err(|err| (ErrorCode::INTERNAL_ERROR, err.to_string())),
                    Err(TicketmasterError::InvalidInvocation(invocation)) => {
                        Err((invocation.rpc_code(), invocation.to_string()))
                    }
                    Err(other) => {
                        error!(tool = %call.name, error = %other, "Tool call failed");
                        Err((ErrorCode::INTERNAL_ERROR, other.to_string()))
                    }
                }
            }
            other => Err((ErrorCode::METHOD_NOT_FOUND, format!("Method not found: {}", other))),
        }
    }
}

fn error_response(id: Value, code: ErrorCode, message: String) -> Value {
    json!({
        "jsonrpc": JSONRPC_VERSION,
        "id": id,
        "error": {"code": code, "message": message}
    })
}
