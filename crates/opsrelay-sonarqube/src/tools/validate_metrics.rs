use super::get_metrics::{fetch_metrics, metrics_to_value};
use opsrelay_core::error::ToolError;
use opsrelay_core::gateway::RemoteApi;
use opsrelay_core::schema::{FieldSpec, ToolSchema};
use opsrelay_mcp::ToolDefinition;
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;

/// Metric keys the threshold checks are defined over.
const THRESHOLD_METRICS: &[&str] = &["coverage", "security_hotspots", "duplicated_lines_density"];

pub fn schema() -> ToolSchema {
    ToolSchema::new()
        .field(
            FieldSpec::string("projectKey", "The project key in SonarQube")
                .required()
                .non_empty(),
        )
        .field(
            FieldSpec::number("minCoverage", "Minimum acceptable coverage percentage")
                .required()
                .range(0.0, 100.0),
        )
        .field(
            FieldSpec::number("maxDuplications", "Maximum acceptable duplicated-lines density")
                .required()
                .range(0.0, 100.0),
        )
        .field(
            FieldSpec::number("maxSecurityHotspots", "Maximum acceptable security hotspot count")
                .required()
                .minimum(0.0),
        )
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "validate_metrics".into(),
        description: "Validate SonarQube metrics against thresholds".into(),
        input_schema: schema().to_json_schema(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateMetricsParams {
    pub project_key: String,
    pub min_coverage: f64,
    pub max_duplications: f64,
    pub max_security_hotspots: f64,
}

fn required_metric(metrics: &BTreeMap<String, f64>, name: &str) -> Result<f64, ToolError> {
    metrics.get(name).copied().ok_or_else(|| {
        ToolError::MalformedPayload(format!("metric `{}` missing from remote response", name))
    })
}

pub fn run(api: &dyn RemoteApi, params: &ValidateMetricsParams) -> Result<Value, ToolError> {
    let metric_keys: Vec<String> = THRESHOLD_METRICS.iter().map(|k| k.to_string()).collect();
    let metrics = fetch_metrics(api, &params.project_key, &metric_keys)?;

    let coverage = required_metric(&metrics, "coverage")?;
    let duplications = required_metric(&metrics, "duplicated_lines_density")?;
    let hotspots = required_metric(&metrics, "security_hotspots")?;

    // Boundary equality passes: thresholds are inclusive on both sides.
    let coverage_ok = coverage >= params.min_coverage;
    let duplications_ok = duplications <= params.max_duplications;
    let hotspots_ok = hotspots <= params.max_security_hotspots;

    Ok(json!({
        "metrics": metrics_to_value(&metrics)?,
        "validations": {
            "coverage": coverage_ok,
            "duplications": duplications_ok,
            "securityHotspots": hotspots_ok,
        },
        "passed": coverage_ok && duplications_ok && hotspots_ok,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockApi;
    use serde_json::json;

    fn measures_payload() -> Value {
        json!({
            "component": {
                "measures": [
                    { "metric": "coverage", "value": "82.5" },
                    { "metric": "security_hotspots", "value": "3" },
                    { "metric": "duplicated_lines_density", "value": "1.2" }
                ]
            }
        })
    }

    fn params(min_coverage: f64, max_duplications: f64, max_hotspots: f64) -> ValidateMetricsParams {
        ValidateMetricsParams {
            project_key: "proj-1".into(),
            min_coverage,
            max_duplications,
            max_security_hotspots: max_hotspots,
        }
    }

    #[test]
    fn thresholds_equal_to_the_measured_values_pass() {
        let api = MockApi::new();
        api.push_ok(measures_payload());

        let result = run(&api, &params(82.5, 1.2, 3.0)).unwrap();
        assert_eq!(result["validations"]["coverage"], json!(true));
        assert_eq!(result["validations"]["duplications"], json!(true));
        assert_eq!(result["validations"]["securityHotspots"], json!(true));
        assert_eq!(result["passed"], json!(true));
    }

    #[test]
    fn one_failing_check_fails_the_overall_validation() {
        let api = MockApi::new();
        api.push_ok(measures_payload());

        let result = run(&api, &params(90.0, 1.2, 3.0)).unwrap();
        assert_eq!(result["validations"]["coverage"], json!(false));
        assert_eq!(result["validations"]["duplications"], json!(true));
        assert_eq!(result["passed"], json!(false));
    }

    #[test]
    fn result_echoes_the_measured_metrics() {
        let api = MockApi::new();
        api.push_ok(measures_payload());

        let result = run(&api, &params(0.0, 100.0, 10.0)).unwrap();
        assert_eq!(result["metrics"]["coverage"], json!(82.5));
        assert_eq!(result["metrics"]["security_hotspots"], json!(3.0));
    }

    #[test]
    fn missing_threshold_metric_is_a_malformed_payload() {
        let api = MockApi::new();
        api.push_ok(json!({
            "component": { "measures": [{ "metric": "coverage", "value": "82.5" }] }
        }));

        match run(&api, &params(0.0, 100.0, 10.0)).unwrap_err() {
            ToolError::MalformedPayload(msg) => assert!(msg.contains("duplicated_lines_density")),
            other => panic!("expected MalformedPayload, got {other:?}"),
        }
    }

    #[test]
    fn fetches_only_the_three_threshold_metrics() {
        let api = MockApi::new();
        api.push_ok(measures_payload());

        run(&api, &params(0.0, 100.0, 10.0)).unwrap();

        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].1[1],
            (
                "metricKeys".to_string(),
                "coverage,security_hotspots,duplicated_lines_density".to_string()
            )
        );
    }
}
