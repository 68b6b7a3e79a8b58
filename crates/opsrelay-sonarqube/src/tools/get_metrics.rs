use opsrelay_core::constants;
use opsrelay_core::error::ToolError;
use opsrelay_core::gateway::RemoteApi;
use opsrelay_core::schema::{FieldSpec, ToolSchema};
use opsrelay_mcp::ToolDefinition;
use serde::Deserialize;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

pub fn schema() -> ToolSchema {
    ToolSchema::new()
        .field(
            FieldSpec::string("projectKey", "The project key in SonarQube")
                .required()
                .non_empty(),
        )
        .field(
            FieldSpec::string_list("metrics", "Metric keys to fetch")
                .default_list(constants::DEFAULT_METRIC_KEYS),
        )
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "get_metrics".into(),
        description: "Get SonarQube metrics for a project".into(),
        input_schema: schema().to_json_schema(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetMetricsParams {
    pub project_key: String,
    pub metrics: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Measure {
    metric: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct Component {
    measures: Vec<Measure>,
}

#[derive(Debug, Deserialize)]
struct MeasuresPayload {
    component: Component,
}

/// Fetch the named metrics for one project and reshape the remote
/// list-of-pairs into a mapping keyed by metric name.
pub(crate) fn fetch_metrics(
    api: &dyn RemoteApi,
    project_key: &str,
    metric_keys: &[String],
) -> Result<BTreeMap<String, f64>, ToolError> {
    let response = api.get(
        "/api/measures/component",
        &[
            ("component", project_key.to_string()),
            ("metricKeys", metric_keys.join(",")),
        ],
    )?;
    let payload: MeasuresPayload =
        serde_json::from_value(response).map_err(ToolError::malformed)?;

    let mut metrics = BTreeMap::new();
    for measure in payload.component.measures {
        let value: f64 = measure.value.parse().map_err(|_| {
            ToolError::MalformedPayload(format!(
                "metric `{}` has non-numeric value `{}`",
                measure.metric, measure.value
            ))
        })?;
        metrics.insert(measure.metric, value);
    }
    Ok(metrics)
}

pub(crate) fn metrics_to_value(metrics: &BTreeMap<String, f64>) -> Result<Value, ToolError> {
    let mut out = Map::new();
    for (name, value) in metrics {
        let number = Number::from_f64(*value).ok_or_else(|| {
            ToolError::MalformedPayload(format!("metric `{}` is not a finite number", name))
        })?;
        out.insert(name.clone(), Value::Number(number));
    }
    Ok(Value::Object(out))
}

pub fn run(api: &dyn RemoteApi, params: &GetMetricsParams) -> Result<Value, ToolError> {
    let metrics = fetch_metrics(api, &params.project_key, &params.metrics)?;
    metrics_to_value(&metrics)
}
