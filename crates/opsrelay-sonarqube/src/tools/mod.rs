pub mod get_duplicated_files;
pub mod get_hotspots;
pub mod get_issues;
pub mod get_metrics;
pub mod validate_metrics;

use opsrelay_mcp::ToolDefinition;

/// Return all tool definitions.
pub fn list_tools() -> Vec<ToolDefinition> {
    vec![
        get_metrics::definition(),
        validate_metrics::definition(),
        get_issues::definition(),
        get_hotspots::definition(),
        get_duplicated_files::definition(),
    ]
}
