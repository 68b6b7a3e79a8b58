use opsrelay_core::error::ToolError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// MCP tool definition for the tools/list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// A tool server: a fixed catalog of named operations plus dispatch.
///
/// `call` is handed the raw argument mapping; the implementation validates it
/// against the operation's schema before any handler logic runs, so a
/// validation failure never reaches a remote call.
pub trait ToolServer {
    fn name(&self) -> &'static str;

    /// The full operation catalog. Immutable for the process lifetime.
    fn tools(&self) -> Vec<ToolDefinition>;

    /// Validate and execute one invocation.
    fn call(&self, name: &str, arguments: &Value) -> Result<Value, ToolError>;
}
