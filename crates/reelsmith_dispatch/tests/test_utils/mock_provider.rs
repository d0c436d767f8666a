//! Mock provider client for testing.

use async_trait::async_trait;
use reelsmith_dispatch::{CompletionRequest, ProviderClient};
use reelsmith_error::{ProviderError, ProviderErrorKind};
use std::sync::{Arc, Mutex};

/// Behavior configuration for mock responses.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always return success with the given text
    Success(String),
    /// Always return the specified error
    Error(ProviderErrorKind),
    /// Fail N times with the error, then succeed with the text
    FailThenSucceed {
        fail_count: usize,
        error: ProviderErrorKind,
        success_text: String,
    },
    /// Return a sequence of responses (errors or success)
    Sequence(Vec<MockResponse>),
}

/// A single mock response (success or error).
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    Error(ProviderErrorKind),
}

/// Mock provider client with scripted behavior and call counting.
pub struct MockProvider {
    name: String,
    behavior: MockBehavior,
    call_count: Arc<Mutex<usize>>,
}

impl MockProvider {
    /// Create a mock that always succeeds with the given text.
    pub fn new_success(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new_with_behavior(name, MockBehavior::Success(text.into()))
    }

    /// Create a mock that always fails with the given error.
    pub fn new_error(name: impl Into<String>, error: ProviderErrorKind) -> Self {
        Self::new_with_behavior(name, MockBehavior::Error(error))
    }

    /// Create a mock that fails N times, then succeeds.
    ///
    /// Useful for testing retry behavior.
    pub fn new_fail_then_succeed(
        name: impl Into<String>,
        fail_count: usize,
        error: ProviderErrorKind,
        success_text: impl Into<String>,
    ) -> Self {
        Self::new_with_behavior(
            name,
            MockBehavior::FailThenSucceed {
                fail_count,
                error,
                success_text: success_text.into(),
            },
        )
    }

    /// Create a mock with a sequence of responses.
    #[allow(dead_code)]
    pub fn new_sequence(name: impl Into<String>, responses: Vec<MockResponse>) -> Self {
        Self::new_with_behavior(name, MockBehavior::Sequence(responses))
    }

    /// Create a mock with custom behavior.
    pub fn new_with_behavior(name: impl Into<String>, behavior: MockBehavior) -> Self {
        Self {
            name: name.into(),
            behavior,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Handle on the call counter, valid after the mock moves into a dispatcher.
    pub fn call_counter(&self) -> Arc<Mutex<usize>> {
        Arc::clone(&self.call_count)
    }

    fn next_response(&self) -> Result<String, ProviderError> {
        let mut count = self.call_count.lock().unwrap();
        let current = *count;
        *count += 1;

        match &self.behavior {
            MockBehavior::Success(text) => Ok(text.clone()),
            MockBehavior::Error(kind) => Err(ProviderError::new(kind.clone())),
            MockBehavior::FailThenSucceed {
                fail_count,
                error,
                success_text,
            } => {
                if current < *fail_count {
                    Err(ProviderError::new(error.clone()))
                } else {
                    Ok(success_text.clone())
                }
            }
            MockBehavior::Sequence(responses) => match responses.get(current) {
                Some(MockResponse::Success(text)) => Ok(text.clone()),
                Some(MockResponse::Error(kind)) => Err(ProviderError::new(kind.clone())),
                None => Err(ProviderError::new(ProviderErrorKind::Network(format!(
                    "mock sequence exhausted (call {} beyond {} responses)",
                    current + 1,
                    responses.len()
                )))),
            },
        }
    }
}

#[async_trait]
impl ProviderClient for MockProvider {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, ProviderError> {
        // Minimal delay to exercise the async path
        tokio::time::sleep(tokio::time::Duration::from_millis(1)).await;
        self.next_response()
    }

    fn provider_name(&self) -> &str {
        &self.name
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
