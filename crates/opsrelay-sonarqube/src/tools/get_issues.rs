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
            FieldSpec::string("severities", "Comma-separated severity filter").allowed(&[
                "INFO", "MINOR", "MAJOR", "CRITICAL", "BLOCKER",
            ]),
        )
        .field(
            FieldSpec::string("types", "Comma-separated issue type filter").allowed(&[
                "BUG",
                "VULNERABILITY",
                "CODE_SMELL",
            ]),
        )
        .field(
            FieldSpec::string("statuses", "Comma-separated status filter").allowed(&[
                "OPEN", "CONFIRMED", "REOPENED", "RESOLVED", "CLOSED",
            ]),
        )
        .field(
            FieldSpec::string("impactSoftwareQualities", "Software quality impact filter").allowed(
                &["MAINTAINABILITY", "RELIABILITY", "SECURITY"],
            ),
        )
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "get_issues".into(),
        description: "Get all issues for a project".into(),
        input_schema: schema().to_json_schema(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetIssuesParams {
    pub project_key: String,
    pub page_size: u64,
    pub page_index: u64,
    pub severities: Option<String>,
    pub types: Option<String>,
    pub statuses: Option<String>,
    pub impact_software_qualities: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawIssue {
    key: String,
    severity: String,
    component: String,
    line: Option<u64>,
    message: String,
    author: Option<String>,
    tags: Option<Vec<String>>,
    creation_date: String,
    #[serde(rename = "type")]
    issue_type: String,
}

#[derive(Debug, Deserialize)]
struct IssuesPayload {
    total: u64,
    issues: Vec<RawIssue>,
}

/// Stable subset of one remote issue, with defaults applied and the requested
/// quality filter echoed back onto every record.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRecord {
    pub key: String,
    pub severity: String,
    pub component: String,
    pub line: Option<u64>,
    pub message: String,
    pub author: String,
    pub tags: Vec<String>,
    pub creation_date: String,
    #[serde(rename = "type")]
    pub issue_type: String,
    pub quality: String,
}

pub fn run(api: &dyn RemoteApi, params: &GetIssuesParams) -> Result<Value, ToolError> {
    let mut query = vec![
        ("componentKeys", params.project_key.clone()),
        ("ps", params.page_size.to_string()),
        ("p", params.page_index.to_string()),
    ];
    // Optional filters are omitted entirely when unset, never sent empty.
    if let Some(severities) = &params.severities {
        query.push(("severities", severities.clone()));
    }
    if let Some(types) = &params.types {
        query.push(("types", types.clone()));
    }
    if let Some(statuses) = &params.statuses {
        query.push(("statuses", statuses.clone()));
    }
    if let Some(qualities) = &params.impact_software_qualities {
        query.push(("impactSoftwareQualities", qualities.clone()));
    }

    let response = api.get("/api/issues/search", &query)?;
    let payload: IssuesPayload = serde_json::from_value(response).map_err(ToolError::malformed)?;

    let quality = params
        .impact_software_qualities
        .clone()
        .unwrap_or_else(|| "Unknown".to_string());
    let issues: Vec<IssueRecord> = payload
        .issues
        .into_iter()
        .map(|issue| IssueRecord {
            key: issue.key,
            severity: issue.severity,
            component: issue.component,
            line: issue.line,
            message: issue.message,
            author: issue.author.unwrap_or_else(|| "Unknown".to_string()),
            tags: issue.tags.unwrap_or_default(),
            creation_date: issue.creation_date,
            issue_type: issue.issue_type,
            quality: quality.clone(),
        })
        .collect();

    Ok(serde_json::json!({
        "totalIssues": payload.total,
        "issues": issues,
    }))
}
