//! Dispatch configuration.

use crate::provider::ProviderKind;
use serde::{Deserialize, Serialize};

/// Retry behavior for a single provider before falling back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Retries after the first attempt, transient failures only
    pub max_retries: usize,
    /// Initial backoff delay, doubled each retry and jittered
    pub initial_backoff_ms: u64,
    /// Backoff ceiling
    pub max_delay_secs: u64,
    /// Per-attempt HTTP deadline
    pub attempt_timeout_secs: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff_ms: 500,
            max_delay_secs: 30,
            attempt_timeout_secs: 60,
        }
    }
}

/// One configured provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Which provider endpoint
    pub kind: ProviderKind,
    /// Bearer token
    pub api_key: String,
    /// Model override; `None` uses the provider default
    #[serde(default)]
    pub model: Option<String>,
}

/// Full dispatch-layer configuration.
///
/// The fallback order is the configured provider order with
/// `default_provider` moved to the front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// All configured providers
    pub providers: Vec<ProviderSettings>,
    /// Provider tried first
    pub default_provider: ProviderKind,
    /// Retry behavior shared by all providers
    #[serde(default)]
    pub retry: RetryPolicy,
}

impl DispatchConfig {
    /// Providers in fallback order: the default first, the rest in
    /// configured order.
    pub fn ordered_providers(&self) -> Vec<&ProviderSettings> {
        let mut ordered: Vec<&ProviderSettings> = Vec::with_capacity(self.providers.len());
        ordered.extend(
            self.providers
                .iter()
                .filter(|p| p.kind == self.default_provider),
        );
        ordered.extend(
            self.providers
                .iter()
                .filter(|p| p.kind != self.default_provider),
        );
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(kind: ProviderKind) -> ProviderSettings {
        ProviderSettings {
            kind,
            api_key: "key".to_string(),
            model: None,
        }
    }

    #[test]
    fn default_provider_moves_to_front() {
        let config = DispatchConfig {
            providers: vec![
                settings(ProviderKind::OpenAi),
                settings(ProviderKind::DeepSeek),
                settings(ProviderKind::Grok),
            ],
            default_provider: ProviderKind::DeepSeek,
            retry: RetryPolicy::default(),
        };
        let order: Vec<ProviderKind> = config
            .ordered_providers()
            .iter()
            .map(|p| p.kind)
            .collect();
        assert_eq!(
            order,
            vec![
                ProviderKind::DeepSeek,
                ProviderKind::OpenAi,
                ProviderKind::Grok
            ]
        );
    }

    #[test]
    fn retry_policy_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.initial_backoff_ms, 500);
    }
}
