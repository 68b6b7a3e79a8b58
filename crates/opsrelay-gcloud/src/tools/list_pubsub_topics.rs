use opsrelay_core::error::ToolError;
use opsrelay_core::gateway::RemoteApi;
use opsrelay_core::schema::{FieldSpec, ToolSchema};
use opsrelay_mcp::ToolDefinition;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

pub fn schema() -> ToolSchema {
    ToolSchema::new().field(
        FieldSpec::string("projectId", "Cloud project ID")
            .required()
            .non_empty(),
    )
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "list_pubsub_topics".into(),
        description: "List all Pub/Sub topics in a specific project".into(),
        input_schema: schema().to_json_schema(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPubSubTopicsParams {
    pub project_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TopicRecord {
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct ListTopicsPayload {
    #[serde(default)]
    topics: Vec<TopicRecord>,
}

pub fn run(api: &dyn RemoteApi, params: &ListPubSubTopicsParams) -> Result<Value, ToolError> {
    let path = format!("/v1beta2/projects/{}/topics", params.project_id);
    debug!(project = %params.project_id, "listing pubsub topics");
    let response = api.get(&path, &[])?;

    // An absent `topics` array means the project has none, not an error.
    let payload: ListTopicsPayload =
        serde_json::from_value(response).map_err(ToolError::malformed)?;
    serde_json::to_value(payload.topics).map_err(ToolError::internal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockApi;
    use serde_json::json;

    fn params() -> ListPubSubTopicsParams {
        ListPubSubTopicsParams {
            project_id: "proj-1".into(),
        }
    }

    #[test]
    fn queries_the_project_topics_path() {
        let api = MockApi::new();
        api.push_ok(json!({ "topics": [] }));

        run(&api, &params()).unwrap();

        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "/v1beta2/projects/proj-1/topics");
    }

    #[test]
    fn empty_topics_array_yields_an_empty_result_not_an_error() {
        let api = MockApi::new();
        api.push_ok(json!({ "topics": [] }));
        assert_eq!(run(&api, &params()).unwrap(), json!([]));
    }

    #[test]
    fn missing_topics_field_yields_an_empty_result_not_an_error() {
        let api = MockApi::new();
        api.push_ok(json!({}));
        assert_eq!(run(&api, &params()).unwrap(), json!([]));
    }

    #[test]
    fn topic_names_pass_through_unchanged() {
        let api = MockApi::new();
        api.push_ok(json!({
            "topics": [
                { "name": "projects/proj-1/topics/audit" },
                { "name": "projects/proj-1/topics/events", "labels": { "team": "core" } }
            ]
        }));

        let result = run(&api, &params()).unwrap();
        assert_eq!(
            result,
            json!([
                { "name": "projects/proj-1/topics/audit" },
                { "name": "projects/proj-1/topics/events" }
            ])
        );
    }

    #[test]
    fn remote_failure_propagates_unchanged() {
        let api = MockApi::new();
        api.push_err(ToolError::RemoteApi {
            status: 403,
            body: "permission denied".into(),
        });

        match run(&api, &params()).unwrap_err() {
            ToolError::RemoteApi { status, .. } => assert_eq!(status, 403),
            other => panic!("expected RemoteApi, got {other:?}"),
        }
    }
}
