//! Process-wide constants shared across the opsrelay crates.

/// MCP protocol revision advertised in the `initialize` response.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Default page size for paginated analysis queries.
pub const DEFAULT_PAGE_SIZE: u64 = 100;

/// Default page index (SonarQube pages are 1-based).
pub const DEFAULT_PAGE_INDEX: u64 = 1;

/// Metric keys fetched by `get_metrics` when the caller does not name any.
pub const DEFAULT_METRIC_KEYS: &[&str] = &[
    "reliability_rating",
    "bugs",
    "code_smells",
    "sqale_rating",
    "sqale_index",
    "vulnerabilities",
    "security_rating",
    "coverage",
    "security_hotspots",
    "duplicated_lines_density",
];

/// Environment variables read once at startup.
pub const ENV_SONAR_URL: &str = "SONAR_URL";
pub const ENV_SONAR_TOKEN: &str = "SONAR_TOKEN";
pub const ENV_GCLOUD_ACCESS_TOKEN: &str = "GCLOUD_ACCESS_TOKEN";
pub const ENV_GCLOUD_FUNCTIONS_URL: &str = "GCLOUD_FUNCTIONS_URL";
pub const ENV_GCLOUD_PUBSUB_URL: &str = "GCLOUD_PUBSUB_URL";

pub const DEFAULT_SONAR_URL: &str = "http://localhost:9000";
pub const DEFAULT_FUNCTIONS_URL: &str = "https://cloudfunctions.googleapis.com";
pub const DEFAULT_PUBSUB_URL: &str = "https://pubsub.googleapis.com";
