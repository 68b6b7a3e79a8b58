//! Tool server listing cloud resources: Cloud Functions and Pub/Sub topics.

pub mod tools;

#[cfg(test)]
pub(crate) mod testing;

use opsrelay_core::config::CloudConfig;
use opsrelay_core::error::ToolError;
use opsrelay_core::gateway::{HttpGateway, RemoteApi};
use opsrelay_mcp::{ToolDefinition, ToolServer};
use serde_json::Value;

/// The cloud resource-listing server.
///
/// Functions and Pub/Sub live behind separate hosts, so the server owns one
/// gateway per service. Both are injected, which is also the test seam.
pub struct CloudServer {
    functions: Box<dyn RemoteApi>,
    pubsub: Box<dyn RemoteApi>,
}

impl CloudServer {
    pub fn new(functions: Box<dyn RemoteApi>, pubsub: Box<dyn RemoteApi>) -> Self {
        Self { functions, pubsub }
    }

    pub fn from_config(config: &CloudConfig) -> Self {
        Self::new(
            Box::new(HttpGateway::new(
                config.functions_url.clone(),
                config.access_token.clone(),
            )),
            Box::new(HttpGateway::new(
                config.pubsub_url.clone(),
                config.access_token.clone(),
            )),
        )
    }
}

impl ToolServer for CloudServer {
    fn name(&self) -> &'static str {
        "gcloud-mcp-server"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        tools::list_tools()
    }

    fn call(&self, name: &str, arguments: &Value) -> Result<Value, ToolError> {
        match name {
            "list_cloud_functions" => {
                let params = tools::list_cloud_functions::schema()
                    .validate(arguments)?
                    .parse()?;
                tools::list_cloud_functions::run(self.functions.as_ref(), &params)
            }
            "list_pubsub_topics" => {
                let params = tools::list_pubsub_topics::schema()
                    .validate(arguments)?
                    .parse()?;
                tools::list_pubsub_topics::run(self.pubsub.as_ref(), &params)
            }
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }
}
