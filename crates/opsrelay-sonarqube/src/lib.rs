//! Tool server for the code-quality analysis API: metrics, issues, security
//! hotspots, and project-wide duplication reports.

pub mod tools;

#[cfg(test)]
pub(crate) mod testing;

use opsrelay_core::config::SonarConfig;
use opsrelay_core::error::ToolError;
use opsrelay_core::gateway::{HttpGateway, RemoteApi};
use opsrelay_mcp::{ToolDefinition, ToolServer};
use serde_json::Value;

/// The analysis server. Owns one injected gateway to the analysis API; the
/// injection point doubles as the test seam.
pub struct SonarServer {
    api: Box<dyn RemoteApi>,
}

impl SonarServer {
    pub fn new(api: Box<dyn RemoteApi>) -> Self {
        Self { api }
    }

    pub fn from_config(config: &SonarConfig) -> Self {
        Self::new(Box::new(HttpGateway::new(
            config.base_url.clone(),
            config.token.clone(),
        )))
    }
}

impl ToolServer for SonarServer {
    fn name(&self) -> &'static str {
        "sonarqube-mcp-server"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        tools::list_tools()
    }

    fn call(&self, name: &str, arguments: &Value) -> Result<Value, ToolError> {
        let api = self.api.as_ref();
        match name {
            "get_metrics" => {
                let params = tools::get_metrics::schema().validate(arguments)?.parse()?;
                tools::get_metrics::run(api, &params)
            }
            "validate_metrics" => {
                let params = tools::validate_metrics::schema()
                    .validate(arguments)?
                    .parse()?;
                tools::validate_metrics::run(api, &params)
            }
            "get_issues" => {
                let params = tools::get_issues::schema().validate(arguments)?.parse()?;
                tools::get_issues::run(api, &params)
            }
            "get_hotspots" => {
                let params = tools::get_hotspots::schema().validate(arguments)?.parse()?;
                tools::get_hotspots::run(api, &params)
            }
            "get_duplicated_files" => {
                let params = tools::get_duplicated_files::schema()
                    .validate(arguments)?
                    .parse()?;
                tools::get_duplicated_files::run(api, &params)
            }
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }
}
