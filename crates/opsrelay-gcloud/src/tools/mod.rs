pub mod list_cloud_functions;
pub mod list_pubsub_topics;

use opsrelay_mcp::ToolDefinition;

/// Return all tool definitions.
pub fn list_tools() -> Vec<ToolDefinition> {
    vec![
        list_cloud_functions::definition(),
        list_pubsub_topics::definition(),
    ]
}
