//! Test double for the remote gateway.

use opsrelay_core::error::ToolError;
use opsrelay_core::gateway::RemoteApi;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct MockState {
    responses: VecDeque<Result<Value, ToolError>>,
    calls: Vec<(String, Vec<(String, String)>)>,
}

/// Scripted [`RemoteApi`] recording every call. Clones share state, so a test
/// can keep one handle while the server owns another.
#[derive(Clone, Default)]
pub struct MockApi {
    state: Arc<Mutex<MockState>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, response: Value) {
        self.state.lock().unwrap().responses.push_back(Ok(response));
    }

    pub fn push_err(&self, error: ToolError) {
        self.state.lock().unwrap().responses.push_back(Err(error));
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    pub fn calls(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.state.lock().unwrap().calls.clone()
    }
}

impl RemoteApi for MockApi {
    fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ToolError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push((
            path.to_string(),
            query.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
        ));
        state
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(ToolError::Internal("mock response queue exhausted".into())))
    }
}
