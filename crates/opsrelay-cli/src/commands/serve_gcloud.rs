use anyhow::{Context, Result};
use opsrelay_core::config::CloudConfig;
use opsrelay_gcloud::CloudServer;

pub fn run() -> Result<()> {
    let config = CloudConfig::from_env().context("Failed to load cloud configuration")?;
    let server = CloudServer::from_config(&config);
    opsrelay_mcp::server::run_server(&server).map_err(|e| anyhow::anyhow!("MCP server error: {}", e))
}
