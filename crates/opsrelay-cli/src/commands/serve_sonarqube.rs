use anyhow::{Context, Result};
use opsrelay_core::config::SonarConfig;
use opsrelay_sonarqube::SonarServer;

pub fn run() -> Result<()> {
    let config = SonarConfig::from_env().context("Failed to load SonarQube configuration")?;
    let server = SonarServer::from_config(&config);
    opsrelay_mcp::server::run_server(&server).map_err(|e| anyhow::anyhow!("MCP server error: {}", e))
}
