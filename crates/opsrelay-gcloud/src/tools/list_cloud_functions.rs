use opsrelay_core::error::ToolError;
use opsrelay_core::gateway::RemoteApi;
use opsrelay_core::schema::{FieldSpec, ToolSchema};
use opsrelay_mcp::ToolDefinition;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

pub fn schema() -> ToolSchema {
    ToolSchema::new()
        .field(
            FieldSpec::string("projectId", "Cloud project ID")
                .required()
                .non_empty(),
        )
        .field(
            FieldSpec::string("region", "Deployment region, e.g. \"us-central1\"")
                .required()
                .non_empty(),
        )
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "list_cloud_functions".into(),
        description: "List all Cloud Functions in a specific project and region".into(),
        input_schema: schema().to_json_schema(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCloudFunctionsParams {
    pub project_id: String,
    pub region: String,
}

/// Stable subset of one remote function entity. Unknown remote fields are
/// dropped on deserialization.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudFunctionRecord {
    pub name: String,
    pub entry_point: String,
    pub runtime: String,
    pub available_memory_mb: u64,
    pub timeout: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
struct ListFunctionsPayload {
    #[serde(default)]
    functions: Vec<CloudFunctionRecord>,
}

pub fn run(api: &dyn RemoteApi, params: &ListCloudFunctionsParams) -> Result<Value, ToolError> {
    let path = format!(
        "/v1/projects/{}/locations/{}/functions",
        params.project_id, params.region
    );
    debug!(project = %params.project_id, region = %params.region, "listing cloud functions");
    let response = api.get(&path, &[])?;

    // An absent `functions` array means no deployments, not an error.
    let payload: ListFunctionsPayload =
        serde_json::from_value(response).map_err(ToolError::malformed)?;
    serde_json::to_value(payload.functions).map_err(ToolError::internal)
}
