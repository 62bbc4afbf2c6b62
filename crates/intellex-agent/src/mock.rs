//! Mock content generator for deterministic testing.
//!
//! Records every invocation and returns configurable responses, including
//! per-input failures, so dispatch-loop tests can assert ordering and
//! failure isolation without a live model.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use intellex_core::{now_ms, AgentThought, ContentGenerator, Error, ResearchProject, Result};

#[derive(Debug, Clone)]
struct MockConfig {
    default_response: String,
    fixed_responses: HashMap<String, String>,
    failures: HashMap<String, String>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            default_response: "Mock response".to_string(),
            fixed_responses: HashMap::new(),
            failures: HashMap::new(),
        }
    }
}

/// One recorded generator invocation.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub project_id: String,
    pub user_content: String,
}

/// Mock [`ContentGenerator`] for testing.
#[derive(Clone, Default)]
pub struct MockGenerator {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

impl MockGenerator {
    /// Create a mock generator with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the response returned for inputs without a fixed response.
    pub fn with_default_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).default_response = response.into();
        self
    }

    /// Set a fixed response for a specific user content.
    pub fn with_response_for(
        mut self,
        user_content: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Arc::make_mut(&mut self.config)
            .fixed_responses
            .insert(user_content.into(), response.into());
        self
    }

    /// Make generation fail for a specific user content.
    pub fn with_failure_for(
        mut self,
        user_content: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Arc::make_mut(&mut self.config)
            .failures
            .insert(user_content.into(), error.into());
        self
    }

    /// All invocations recorded so far, in call order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Number of invocations recorded so far.
    pub fn call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }
}

#[async_trait]
impl ContentGenerator for MockGenerator {
    async fn process(
        &self,
        project: &ResearchProject,
        user_content: &str,
    ) -> Result<(String, Vec<AgentThought>)> {
        self.call_log.lock().unwrap().push(MockCall {
            project_id: project.id.clone(),
            user_content: user_content.to_string(),
        });

        if let Some(error) = self.config.failures.get(user_content) {
            return Err(Error::Inference(error.clone()));
        }

        let response = self
            .config
            .fixed_responses
            .get(user_content)
            .cloned()
            .unwrap_or_else(|| self.config.default_response.clone());

        let thoughts = vec![AgentThought {
            id: "th-mock".to_string(),
            title: "Mock Step".to_string(),
            content: format!("Handled '{}'", user_content),
            status: "completed".to_string(),
            timestamp: now_ms(),
        }];

        Ok((response, thoughts))
    }
}
