//! A canned solver for tests and offline use.

use anyhow::Result;
use async_trait::async_trait;

use tutorforge_core::{ChatMessage, SolveRequest, SolverProvider};

/// Returns a fixed response to every call.
pub struct MockSolver {
    fixed_response: Option<String>,
}

impl MockSolver {
    pub fn new() -> Self {
        Self {
            fixed_response: None,
        }
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.fixed_response = Some(response.into());
        self
    }

    fn response(&self) -> String {
        self.fixed_response
            .clone()
            .unwrap_or_else(|| "Mock response".to_string())
    }
}

impl Default for MockSolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SolverProvider for MockSolver {
    fn name(&self) -> &str {
        "mock"
    }

    async fn solve(&self, _request: &SolveRequest) -> Result<String> {
        Ok(self.response())
    }

    async fn respond(&self, _system: &str, _history: &[ChatMessage]) -> Result<String> {
        Ok(self.response())
    }
}
