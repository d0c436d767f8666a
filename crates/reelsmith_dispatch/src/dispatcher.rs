//! Retry-and-fallback dispatcher over the configured providers.

use crate::client::ChatClient;
use crate::config::{DispatchConfig, RetryPolicy};
use crate::extraction::extract_json;
use crate::params::GenerateParams;
use crate::provider::{CompletionRequest, ProviderClient};
use reelsmith_error::{
    DispatchError, DispatchErrorKind, ProviderError, ProviderFailure, ReelsmithResult,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry2::strategy::{ExponentialBackoff, jitter};
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, info, instrument, warn};

/// Walks an ordered provider list until one yields parseable JSON.
///
/// Transient failures (network, timeout, rate limit, 5xx) are retried
/// against the same provider with exponential backoff; fatal failures
/// advance to the next provider immediately. A provider that answers but
/// whose answer does not parse into the expected shape ends the whole
/// dispatch with a malformed-response error; parse failures never trigger
/// fallback because the next provider is no more likely to satisfy a prompt
/// the first one misread.
#[derive(Clone)]
pub struct Dispatcher {
    clients: Vec<Arc<dyn ProviderClient>>,
    retry: RetryPolicy,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let providers: Vec<&str> = self.clients.iter().map(|c| c.provider_name()).collect();
        f.debug_struct("Dispatcher")
            .field("providers", &providers)
            .field("retry", &self.retry)
            .finish()
    }
}

impl Dispatcher {
    /// Creates a dispatcher over pre-built clients in fallback order.
    pub fn new(clients: Vec<Arc<dyn ProviderClient>>, retry: RetryPolicy) -> Self {
        Self { clients, retry }
    }

    /// Builds one [`ChatClient`] per configured provider, default first.
    pub fn from_config(config: &DispatchConfig) -> Self {
        let timeout = Duration::from_secs(config.retry.attempt_timeout_secs);
        let clients: Vec<Arc<dyn ProviderClient>> = config
            .ordered_providers()
            .into_iter()
            .map(|settings| {
                Arc::new(ChatClient::new(
                    settings.kind,
                    settings.api_key.clone(),
                    settings.model.clone(),
                    timeout,
                )) as Arc<dyn ProviderClient>
            })
            .collect();
        Self::new(clients, config.retry.clone())
    }

    /// Providers in fallback order, by name.
    pub fn provider_names(&self) -> Vec<&str> {
        self.clients.iter().map(|c| c.provider_name()).collect()
    }

    /// Generates a completion and parses it into JSON of the requested shape.
    ///
    /// # Errors
    ///
    /// - [`DispatchErrorKind::NoProviders`] when the provider list is empty
    /// - [`DispatchErrorKind::GenerationUnavailable`] when every provider
    ///   failed, carrying one reason per provider in fallback order
    /// - [`DispatchErrorKind::MalformedResponse`] when a provider answered
    ///   but the answer did not parse into the expected shape
    #[instrument(skip(self, params), fields(providers = self.clients.len()))]
    pub async fn generate(&self, params: &GenerateParams) -> ReelsmithResult<Value> {
        if self.clients.is_empty() {
            return Err(DispatchError::new(DispatchErrorKind::NoProviders).into());
        }

        let request = CompletionRequest {
            system: params.system().map(str::to_string),
            prompt: params.prompt().to_string(),
            temperature: params.temperature(),
            max_tokens: params.max_tokens(),
            json_mode: true,
        };

        let mut attempts: Vec<ProviderFailure> = Vec::new();

        for client in &self.clients {
            let provider = client.provider_name().to_string();
            match self.attempt_provider(client.as_ref(), &request).await {
                Ok(raw) => {
                    info!(provider = %provider, "Provider produced a completion");
                    return self.parse_response(&provider, &raw, params);
                }
                Err(e) => {
                    warn!(provider = %provider, error = %e, "Provider exhausted, falling back");
                    attempts.push(ProviderFailure::new(provider, e.kind.to_string()));
                }
            }
        }

        Err(DispatchError::new(DispatchErrorKind::GenerationUnavailable { attempts }).into())
    }

    /// Runs one provider with backoff on transient failures.
    async fn attempt_provider(
        &self,
        client: &dyn ProviderClient,
        request: &CompletionRequest,
    ) -> Result<String, ProviderError> {
        let strategy = ExponentialBackoff::from_millis(self.retry.initial_backoff_ms)
            .factor(2)
            .max_delay(Duration::from_secs(self.retry.max_delay_secs))
            .map(jitter)
            .take(self.retry.max_retries);

        Retry::spawn(strategy, || async {
            match client.complete(request).await {
                Ok(text) => Ok(text),
                Err(e) if e.is_transient() => {
                    warn!(provider = %client.provider_name(), error = %e, "Transient provider failure, will retry");
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => {
                    warn!(provider = %client.provider_name(), error = %e, "Fatal provider failure");
                    Err(RetryError::Permanent(e))
                }
            }
        })
        .await
    }

    /// Extracts, parses, and shape-checks a raw completion.
    fn parse_response(
        &self,
        provider: &str,
        raw: &str,
        params: &GenerateParams,
    ) -> ReelsmithResult<Value> {
        let json = extract_json(raw).ok_or_else(|| {
            DispatchError::new(DispatchErrorKind::MalformedResponse {
                provider: provider.to_string(),
                reason: format!("no JSON found in response ({} bytes)", raw.len()),
            })
        })?;

        let value: Value = serde_json::from_str(&json).map_err(|e| {
            DispatchError::new(DispatchErrorKind::MalformedResponse {
                provider: provider.to_string(),
                reason: format!("invalid JSON: {e}"),
            })
        })?;

        if !params.shape().matches(&value) {
            return Err(DispatchError::new(DispatchErrorKind::MalformedResponse {
                provider: provider.to_string(),
                reason: format!("expected a JSON {}", params.shape().name()),
            })
            .into());
        }

        debug!(provider = %provider, "Parsed completion into expected shape");
        Ok(value)
    }
}
