//! Line-delimited JSON-RPC server loop over stdio.
//!
//! One request is processed start-to-finish before the next line is read; the
//! transport serializes invocations, so handlers never run concurrently.

use crate::protocol::{
    INTERNAL_ERROR, INVALID_PARAMS, JsonRpcRequest, JsonRpcResponse, METHOD_NOT_FOUND, PARSE_ERROR,
};
use crate::tools::ToolServer;
use opsrelay_core::constants;
use opsrelay_core::error::ToolError;
use serde_json::{Value, json};
use std::io::{self, BufRead, Write};
use tracing::{error, info};

/// Run the server loop on stdin/stdout until EOF.
pub fn run_server(server: &dyn ToolServer) -> io::Result<()> {
    info!(server = server.name(), "MCP server started on stdio");
    serve(server, io::stdin().lock(), io::stdout().lock())
}

fn serve<R: BufRead, W: Write>(server: &dyn ToolServer, reader: R, mut writer: W) -> io::Result<()> {
    for line in reader.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!("stdin read error: {}", e);
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<JsonRpcRequest>(&line) {
            Ok(request) => handle_request(server, &request),
            Err(e) => JsonRpcResponse::error(None, PARSE_ERROR, format!("Parse error: {}", e)),
        };
        write_response(&mut writer, &response)?;
    }
    Ok(())
}

fn write_response<W: Write>(writer: &mut W, response: &JsonRpcResponse) -> io::Result<()> {
    let serialized = serde_json::to_string(response).map_err(io::Error::other)?;
    writeln!(writer, "{}", serialized)?;
    writer.flush()
}

/// Route one request: catalog advertisement, invocation, or protocol plumbing.
pub fn handle_request(server: &dyn ToolServer, request: &JsonRpcRequest) -> JsonRpcResponse {
    match request.method.as_str() {
        "initialize" => JsonRpcResponse::success(
            request.id.clone(),
            json!({
                "protocolVersion": constants::PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": server.name(),
                    "version": env!("CARGO_PKG_VERSION")
                }
            }),
        ),
        "notifications/initialized" => JsonRpcResponse::success(request.id.clone(), json!({})),
        "tools/list" => {
            JsonRpcResponse::success(request.id.clone(), json!({ "tools": server.tools() }))
        }
        "tools/call" => {
            let tool_name = request
                .params
                .get("name")
                .and_then(|v| v.as_str())
                .unwrap_or("");
            let arguments = request
                .params
                .get("arguments")
                .cloned()
                .unwrap_or(json!({}));

            match server.call(tool_name, &arguments) {
                Ok(result) => tool_text_response(request.id.clone(), &result),
                Err(e) => {
                    error!(tool = tool_name, "tool call failed: {}", e);
                    JsonRpcResponse::error(request.id.clone(), error_code(&e), error_message(&e))
                }
            }
        }
        _ => JsonRpcResponse::error(
            request.id.clone(),
            METHOD_NOT_FOUND,
            format!("Method not found: {}", request.method),
        ),
    }
}

/// Wrap a handler result as the invocation's successful payload.
fn tool_text_response(id: Option<Value>, payload: &Value) -> JsonRpcResponse {
    JsonRpcResponse::success(
        id,
        json!({
            "content": [{
                "type": "text",
                "text": serde_json::to_string_pretty(payload).unwrap_or_default()
            }]
        }),
    )
}

fn error_code(err: &ToolError) -> i32 {
    match err {
        ToolError::InvalidInput(_) => INVALID_PARAMS,
        ToolError::UnknownTool(_) => METHOD_NOT_FOUND,
        _ => INTERNAL_ERROR,
    }
}

/// One uniform descriptive message per failure, regardless of origin.
fn error_message(err: &ToolError) -> String {
    match err {
        ToolError::InvalidInput(violations) => format!("Invalid input: {}", violations),
        ToolError::UnknownTool(name) => format!("Unknown tool: {}", name),
        other => format!("Operation failed: {}", other),
    }
}
