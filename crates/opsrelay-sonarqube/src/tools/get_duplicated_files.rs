//! Aggregating handler: project-wide duplication report.
//!
//! One call lists every file-type component of the project, then one call per
//! file fetches its duplication detail, strictly in listing order. Files with
//! no duplication groups are omitted. Any sub-request failure aborts the whole
//! aggregation; no partial report is returned.

use opsrelay_core::error::ToolError;
use opsrelay_core::gateway::RemoteApi;
use opsrelay_core::schema::{FieldSpec, ToolSchema};
use opsrelay_mcp::ToolDefinition;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

pub fn schema() -> ToolSchema {
    ToolSchema::new().field(
        FieldSpec::string("projectKey", "The project key in SonarQube")
            .required()
            .non_empty(),
    )
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "get_duplicated_files".into(),
        description: "Get all duplicated files for a project".into(),
        input_schema: schema().to_json_schema(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetDuplicationsParams {
    pub project_key: String,
}

#[derive(Debug, Deserialize)]
struct ComponentEntry {
    key: String,
    path: String,
}

#[derive(Debug, Deserialize)]
struct ComponentTreePayload {
    #[serde(default)]
    components: Vec<ComponentEntry>,
}

#[derive(Debug, Deserialize)]
struct RawBlock {
    from: u64,
    size: u64,
    #[serde(rename = "_ref")]
    file_ref: String,
}

#[derive(Debug, Deserialize)]
struct RawGroup {
    blocks: Vec<RawBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileRef {
    name: String,
    project_name: String,
}

#[derive(Debug, Deserialize)]
struct DuplicationsPayload {
    duplications: Vec<RawGroup>,
    #[serde(default)]
    files: HashMap<String, FileRef>,
}

/// One duplicated block with its opaque cross-file reference resolved to a
/// human-readable file and project name.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BlockRecord {
    from: u64,
    size: u64,
    reference: String,
    reference_project: String,
}

#[derive(Debug, Serialize)]
struct GroupRecord {
    blocks: Vec<BlockRecord>,
}

#[derive(Debug, Serialize)]
struct FileDuplications {
    file: String,
    duplications: Vec<GroupRecord>,
}

fn list_files(api: &dyn RemoteApi, project_key: &str) -> Result<Vec<ComponentEntry>, ToolError> {
    let response = api.get(
        "/api/components/tree",
        &[
            ("component", project_key.to_string()),
            ("qualifiers", "FIL".to_string()),
        ],
    )?;
    let payload: ComponentTreePayload =
        serde_json::from_value(response).map_err(ToolError::malformed)?;
    Ok(payload.components)
}

fn fetch_file_duplications(
    api: &dyn RemoteApi,
    file_key: &str,
) -> Result<DuplicationsPayload, ToolError> {
    let response = api.get("/api/duplications/show", &[("key", file_key.to_string())])?;
    serde_json::from_value(response).map_err(ToolError::malformed)
}

fn resolve_groups(payload: &DuplicationsPayload) -> Vec<GroupRecord> {
    payload
        .duplications
        .iter()
        .map(|group| GroupRecord {
            blocks: group
                .blocks
                .iter()
                .map(|block| {
                    // A dangling reference is tolerated, not fatal.
                    let file = payload.files.get(&block.file_ref);
                    BlockRecord {
                        from: block.from,
                        size: block.size,
                        reference: file
                            .map(|f| f.name.clone())
                            .unwrap_or_else(|| "Unknown".to_string()),
                        reference_project: file
                            .map(|f| f.project_name.clone())
                            .unwrap_or_else(|| "Unknown".to_string()),
                    }
                })
                .collect(),
        })
        .collect()
}

pub fn run(api: &dyn RemoteApi, params: &GetDuplicationsParams) -> Result<Value, ToolError> {
    let files = list_files(api, &params.project_key)?;
    debug!(
        project = %params.project_key,
        files = files.len(),
        "aggregating duplication data"
    );

    let mut report = Vec::new();
    for file in &files {
        let payload = fetch_file_duplications(api, &file.key)?;
        if payload.duplications.is_empty() {
            continue;
        }
        report.push(FileDuplications {
            file: file.path.clone(),
            duplications: resolve_groups(&payload),
        });
    }

    serde_json::to_value(report).map_err(ToolError::internal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockApi;
    use serde_json::json;

    fn params() -> GetDuplicationsParams {
        GetDuplicationsParams {
            project_key: "proj-1".into(),
        }
    }

    fn tree_payload() -> Value {
        json!({
            "components": [
                { "key": "proj-1:a.rs", "path": "src/a.rs", "qualifier": "FIL" },
                { "key": "proj-1:b.rs", "path": "src/b.rs", "qualifier": "FIL" },
                { "key": "proj-1:c.rs", "path": "src/c.rs", "qualifier": "FIL" }
            ]
        })
    }

    fn group(refs: &[&str]) -> Value {
        json!({
            "blocks": refs
                .iter()
                .enumerate()
                .map(|(i, r)| json!({ "from": 10 * (i as u64 + 1), "size": 5, "_ref": r }))
                .collect::<Vec<_>>()
        })
    }

    #[test]
    fn files_without_duplication_groups_are_omitted_in_listing_order() {
        let api = MockApi::new();
        api.push_ok(tree_payload());
        // File A: two groups.
        api.push_ok(json!({
            "duplications": [group(&["1"]), group(&["1"])],
            "files": { "1": { "key": "proj-1:b.rs", "name": "b.rs", "projectName": "proj-1" } }
        }));
        // File B: none.
        api.push_ok(json!({ "duplications": [], "files": {} }));
        // File C: one group.
        api.push_ok(json!({
            "duplications": [group(&["1"])],
            "files": { "1": { "key": "proj-1:a.rs", "name": "a.rs", "projectName": "proj-1" } }
        }));

        let result = run(&api, &params()).unwrap();
        let entries = result.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["file"], json!("src/a.rs"));
        assert_eq!(entries[1]["file"], json!("src/c.rs"));
        assert_eq!(entries[0]["duplications"].as_array().unwrap().len(), 2);
        assert_eq!(entries[1]["duplications"].as_array().unwrap().len(), 1);

        // One listing call plus one detail call per file, in order.
        let calls = api.calls();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0].0, "/api/components/tree");
        assert_eq!(calls[1].1, vec![("key".to_string(), "proj-1:a.rs".to_string())]);
        assert_eq!(calls[3].1, vec![("key".to_string(), "proj-1:c.rs".to_string())]);
    }

    #[test]
    fn block_references_resolve_through_the_file_reference_table() {
        let api = MockApi::new();
        api.push_ok(json!({
            "components": [{ "key": "proj-1:a.rs", "path": "src/a.rs" }]
        }));
        api.push_ok(json!({
            "duplications": [group(&["1", "missing"])],
            "files": { "1": { "key": "proj-1:b.rs", "name": "b.rs", "projectName": "Project One" } }
        }));

        let result = run(&api, &params()).unwrap();
        let blocks = result[0]["duplications"][0]["blocks"].as_array().unwrap();
        assert_eq!(
            blocks[0],
            json!({ "from": 10, "size": 5, "reference": "b.rs", "referenceProject": "Project One" })
        );
        // Dangling reference falls back to "Unknown" for both names.
        assert_eq!(
            blocks[1],
            json!({ "from": 20, "size": 5, "reference": "Unknown", "referenceProject": "Unknown" })
        );
    }

    #[test]
    fn a_single_sub_request_failure_aborts_the_whole_aggregation() {
        let api = MockApi::new();
        api.push_ok(tree_payload());
        api.push_ok(json!({
            "duplications": [group(&["1"])],
            "files": { "1": { "key": "proj-1:b.rs", "name": "b.rs", "projectName": "proj-1" } }
        }));
        api.push_err(ToolError::RemoteApi {
            status: 500,
            body: "server error".into(),
        });

        match run(&api, &params()).unwrap_err() {
            ToolError::RemoteApi { status, .. } => assert_eq!(status, 500),
            other => panic!("expected RemoteApi, got {other:?}"),
        }
        // The listing call, file A, and the failing file B; file C is never fetched.
        assert_eq!(api.call_count(), 3);
    }

    #[test]
    fn project_without_files_yields_an_empty_report() {
        let api = MockApi::new();
        api.push_ok(json!({ "components": [] }));
        assert_eq!(run(&api, &params()).unwrap(), json!([]));
        assert_eq!(api.call_count(), 1);
    }
}
