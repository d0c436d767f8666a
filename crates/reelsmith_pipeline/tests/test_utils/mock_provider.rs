//! Scripted provider client for pipeline testing.
//!
//! A pipeline run makes its dispatch calls in a fixed order: one ideation
//! call, then one scripting call per idea, then one visuals call per
//! scripted idea. A scripted sequence therefore maps one-to-one onto the
//! run's stages.

use async_trait::async_trait;
use reelsmith_dispatch::{CompletionRequest, ProviderClient};
use reelsmith_error::{ProviderError, ProviderErrorKind};
use std::sync::{Arc, Mutex};

/// One scripted response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    Error(ProviderErrorKind),
}

impl MockResponse {
    pub fn ok(text: impl Into<String>) -> Self {
        Self::Success(text.into())
    }

    pub fn err(kind: ProviderErrorKind) -> Self {
        Self::Error(kind)
    }
}

/// Provider client that replays a fixed response sequence.
pub struct ScriptedProvider {
    responses: Vec<MockResponse>,
    call_count: Arc<Mutex<usize>>,
    temperatures: Arc<Mutex<Vec<Option<f32>>>>,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self {
            responses,
            call_count: Arc::new(Mutex::new(0)),
            temperatures: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle on the call counter, valid after the mock moves into a
    /// dispatcher.
    #[allow(dead_code)]
    pub fn call_counter(&self) -> Arc<Mutex<usize>> {
        Arc::clone(&self.call_count)
    }

    /// Handle on the per-call temperature log.
    #[allow(dead_code)]
    pub fn temperature_log(&self) -> Arc<Mutex<Vec<Option<f32>>>> {
        Arc::clone(&self.temperatures)
    }
}

#[async_trait]
impl ProviderClient for ScriptedProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        self.temperatures.lock().unwrap().push(request.temperature);
        let mut count = self.call_count.lock().unwrap();
        let current = *count;
        *count += 1;
        match self.responses.get(current) {
            Some(MockResponse::Success(text)) => Ok(text.clone()),
            Some(MockResponse::Error(kind)) => Err(ProviderError::new(kind.clone())),
            None => Err(ProviderError::new(ProviderErrorKind::Network(format!(
                "scripted sequence exhausted (call {} beyond {} responses)",
                current + 1,
                self.responses.len()
            )))),
        }
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}
