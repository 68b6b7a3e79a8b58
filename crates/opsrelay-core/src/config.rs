//! Environment-backed configuration.
//!
//! Credentials and base URLs are read once at process start; the servers never
//! touch the environment afterwards. URLs are overridable so a local stub can
//! stand in for the remote platform during development and tests.

use crate::constants;
use crate::error::ConfigError;

/// Connection settings for the analysis (SonarQube) server.
#[derive(Debug, Clone)]
pub struct SonarConfig {
    pub base_url: String,
    pub token: String,
}

impl SonarConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = require_env(constants::ENV_SONAR_TOKEN)?;
        let base_url = env_or(constants::ENV_SONAR_URL, constants::DEFAULT_SONAR_URL);
        Ok(Self { base_url, token })
    }
}

/// Connection settings for the cloud resource-listing server.
///
/// Functions and Pub/Sub live on different hosts, so each gets its own base
/// URL; one access token covers both.
#[derive(Debug, Clone)]
pub struct CloudConfig {
    pub functions_url: String,
    pub pubsub_url: String,
    pub access_token: String,
}

impl CloudConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let access_token = require_env(constants::ENV_GCLOUD_ACCESS_TOKEN)?;
        let functions_url = env_or(
            constants::ENV_GCLOUD_FUNCTIONS_URL,
            constants::DEFAULT_FUNCTIONS_URL,
        );
        let pubsub_url = env_or(
            constants::ENV_GCLOUD_PUBSUB_URL,
            constants::DEFAULT_PUBSUB_URL,
        );
        Ok(Self {
            functions_url,
            pubsub_url,
            access_token,
        })
    }
}

fn require_env(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnv { name }),
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
