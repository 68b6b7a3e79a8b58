use opsrelay_core::constants;
use opsrelay_core::error::ToolError;
use opsrelay_core::gateway::RemoteApi;
use opsrelay_core::schema::{FieldSpec, ToolSchema};
use opsrelay_mcp::ToolDefinition;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub fn schema() -> ToolSchema {
    ToolSchema::new()
        .field(
            FieldSpec::string("projectKey", "The project key in SonarQube")
                .required()
                .non_empty(),
        )
        .field(
            FieldSpec::integer("pageSize", "Maximum results per page")
                .default_value(constants::DEFAULT_PAGE_SIZE),
        )
        .field(
            FieldSpec::integer("pageIndex", "1-based page index")
                .default_value(constants::DEFAULT_PAGE_INDEX),
        )
        .field(
            FieldSpec::string("status", "Review status filter").allowed(&["TO_REVIEW", "REVIEWED"]),
        )
        .field(FieldSpec::string("severity", "Associated severity filter"))
        .field(FieldSpec::string("securityCategory", "Security category filter"))
        .field(FieldSpec::string("owaspTop10", "OWASP Top 10 category (2017 or 2021)"))
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "get_hotspots".into(),
        description: "Get all security hotspots for a project".into(),
        input_schema: schema().to_json_schema(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetHotspotsParams {
    pub project_key: String,
    pub page_size: u64,
    pub page_index: u64,
    pub status: Option<String>,
    pub severity: Option<String>,
    pub security_category: Option<String>,
    pub owasp_top10: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Paging {
    total: u64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotRecord {
    pub key: String,
    pub component: String,
    pub project: String,
    pub security_category: String,
    pub vulnerability_probability: String,
    pub status: String,
    pub line: Option<u64>,
    pub message: String,
    pub author: Option<String>,
    pub creation_date: String,
    pub update_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HotspotsPayload {
    paging: Paging,
    hotspots: Vec<HotspotRecord>,
}

pub fn run(api: &dyn RemoteApi, params: &GetHotspotsParams) -> Result<Value, ToolError> {
    let mut query = vec![
        ("project", params.project_key.clone()),
        ("ps", params.page_size.to_string()),
        ("p", params.page_index.to_string()),
    ];
    if let Some(status) = &params.status {
        query.push(("status", status.clone()));
    }
    if let Some(severity) = &params.severity {
        query.push(("severity", severity.clone()));
    }
    if let Some(category) = &params.security_category {
        query.push(("securityCategory", category.clone()));
    }
    if let Some(owasp) = &params.owasp_top10 {
        query.push(("owaspTop10", owasp.clone()));
    }

    let response = api.get("/api/hotspots/search", &query)?;
    let payload: HotspotsPayload =
        serde_json::from_value(response).map_err(ToolError::malformed)?;

    Ok(serde_json::json!({
        "totalHotspots": payload.paging.total,
        "hotspots": payload.hotspots,
    }))
}
