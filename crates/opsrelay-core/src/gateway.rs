//! Authenticated access to a remote platform API.
//!
//! Handlers talk to the remote service through the [`RemoteApi`] trait so that
//! tests can substitute a mock; [`HttpGateway`] is the production
//! implementation. One gateway is constructed per remote base URL at startup
//! and reused for the process lifetime. There is no retry, backoff, or timeout
//! layer: a single remote failure is surfaced immediately to the calling
//! handler.

use crate::error::ToolError;
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

/// Seam between operation handlers and the remote platform API.
pub trait RemoteApi {
    /// Issue an authenticated GET and return the parsed JSON body.
    fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ToolError>;
}

/// reqwest-backed gateway attaching a bearer credential to every request.
pub struct HttpGateway {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::new(),
            base_url,
            token: token.into(),
        }
    }
}

impl RemoteApi for HttpGateway {
    fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ToolError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, params = query.len(), "remote GET");

        let mut request = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .header("content-type", "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().map_err(ToolError::transport)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(ToolError::transport)?;
        if !(200..300).contains(&status) {
            return Err(classify_failure(status, body));
        }
        serde_json::from_str(&body).map_err(ToolError::malformed)
    }
}

/// Map a non-2xx remote response onto the error taxonomy. 401 is split out so
/// a caller can react to a stale credential differently from a plain API
/// failure.
fn classify_failure(status: u16, body: String) -> ToolError {
    if status == 401 {
        ToolError::AuthenticationFailed { status, body }
    } else {
        ToolError::RemoteApi { status, body }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_401_classifies_as_authentication_failure() {
        match classify_failure(401, "{\"errors\":[{\"msg\":\"bad token\"}]}".into()) {
            ToolError::AuthenticationFailed { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("bad token"));
            }
            other => panic!("expected AuthenticationFailed, got {other:?}"),
        }
    }

    #[test]
    fn other_non_success_statuses_classify_as_remote_api_errors() {
        for status in [400, 403, 404, 500, 503] {
            match classify_failure(status, "boom".into()) {
                ToolError::RemoteApi { status: got, .. } => assert_eq!(got, status),
                other => panic!("expected RemoteApi for {status}, got {other:?}"),
            }
        }
    }

    #[test]
    fn trailing_slashes_are_stripped_from_the_base_url() {
        let gateway = HttpGateway::new("http://localhost:9000/", "tok");
        assert_eq!(gateway.base_url, "http://localhost:9000");
    }
}
