//! Shared fixtures for job engine tests.

use async_trait::async_trait;
use reelsmith_dispatch::{CompletionRequest, Dispatcher, ProviderClient, RetryPolicy};
use reelsmith_error::{ProviderError, ProviderErrorKind};
use reelsmith_persona::PersonaStore;
use reelsmith_pipeline::{ContentPipeline, PromptLibrary, RunStore};
use reelsmith_research::{ResearchAggregator, ResearchCache};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const PERSONA_ID: &str = "sat_coach";

/// One scripted response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    Error(ProviderErrorKind),
}

/// Provider client that replays a fixed sequence and records every
/// prompt it receives.
pub struct ScriptedProvider {
    responses: Vec<MockResponse>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self {
            responses,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle on the recorded prompts, valid after the mock moves into a
    /// dispatcher.
    #[allow(dead_code)]
    pub fn prompts(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.prompts)
    }
}

#[async_trait]
impl ProviderClient for ScriptedProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        let mut prompts = self.prompts.lock().unwrap();
        let current = prompts.len();
        prompts.push(request.prompt.clone());
        match self.responses.get(current) {
            Some(MockResponse::Success(text)) => Ok(text.clone()),
            Some(MockResponse::Error(kind)) => Err(ProviderError::new(kind.clone())),
            None => Err(ProviderError::new(ProviderErrorKind::Network(format!(
                "scripted sequence exhausted (call {})",
                current + 1
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

/// A pipeline over temp-dir stores with one seeded persona, wrapped for
/// engine construction.
pub async fn seeded_pipeline(provider: ScriptedProvider) -> (Arc<ContentPipeline>, TempDir) {
    let tmp = tempfile::tempdir().unwrap();

    let personas = PersonaStore::new(tmp.path().join("personas")).unwrap();
    personas
        .create(PERSONA_ID, "Ava", "SAT Exam Preparation", "High school juniors")
        .await
        .unwrap();

    let cache = ResearchCache::new(tmp.path().join("research_cache")).unwrap();
    let aggregator = ResearchAggregator::new(vec![], cache);
    let runs = RunStore::new(tmp.path().join("runs")).unwrap();
    let retry = RetryPolicy {
        max_retries: 1,
        initial_backoff_ms: 1,
        max_delay_secs: 1,
        attempt_timeout_secs: 5,
    };
    let clients: Vec<Arc<dyn ProviderClient>> = vec![Arc::new(provider)];
    let dispatcher = Dispatcher::new(clients, retry);

    let pipeline = ContentPipeline::new(
        dispatcher,
        aggregator,
        personas,
        PromptLibrary::builtin(),
        runs,
    );
    (Arc::new(pipeline), tmp)
}

/// JSON array of `n` idea objects.
pub fn ideas_array_json(n: u32) -> String {
    let items: Vec<String> = (1..=n)
        .map(|i| {
            format!(
                r#"{{"title":"Idea {i}","hook":"Why do students miss this?","concept":"Concept {i}","key_points":["point a"],"rationale":"resonates","trending_angle":"plateaus","engagement_potential":"medium"}}"#
            )
        })
        .collect();
    format!("[{}]", items.join(","))
}

/// JSON for one script object.
#[allow(dead_code)]
pub fn script_json() -> String {
    r#"{"hook":"Stop doing this on test day.","main_content":["Skip the hardest question first."],"call_to_action":"Save this for test week.","estimated_duration_seconds":25}"#
        .to_string()
}
