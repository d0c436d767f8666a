//! OpenAI-wire chat client.

use crate::provider::{CompletionRequest, ProviderClient, ProviderKind};
use crate::wire::{ChatMessage, ChatRequest, ChatResponse, ResponseFormat};
use async_trait::async_trait;
use reelsmith_error::{ProviderError, ProviderErrorKind};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Chat-completions client for any [`ProviderKind`].
///
/// The three supported providers share the OpenAI wire format; this client
/// covers them all, varying only the base URL, credentials, and model.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: Client,
    kind: ProviderKind,
    api_key: String,
    model: String,
    provider_name: String,
    timeout: Duration,
}

impl ChatClient {
    /// Creates a new client for the given provider.
    ///
    /// # Arguments
    ///
    /// * `kind` - Which provider endpoint to talk to
    /// * `api_key` - Bearer token for that provider
    /// * `model` - Model identifier; `None` uses the provider default
    /// * `timeout` - Per-request deadline
    pub fn new(
        kind: ProviderKind,
        api_key: impl Into<String>,
        model: Option<String>,
        timeout: Duration,
    ) -> Self {
        let model = model.unwrap_or_else(|| kind.default_model().to_string());
        debug!(provider = %kind, model = %model, "Creating chat client");
        Self {
            client: Client::new(),
            kind,
            api_key: api_key.into(),
            model,
            provider_name: kind.to_string(),
            timeout,
        }
    }

    fn convert_request(&self, request: &CompletionRequest) -> ChatRequest {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(ChatMessage::system(system));
        }
        messages.push(ChatMessage::user(&request.prompt));

        let response_format = (request.json_mode && self.kind.supports_json_mode())
            .then(ResponseFormat::json_object);

        ChatRequest {
            model: self.model.clone(),
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format,
        }
    }

    /// Maps a non-success HTTP status onto the provider error taxonomy.
    ///
    /// 408/429/5xx are transient and retried within the provider; the rest
    /// are fatal and advance the fallback order.
    fn classify_status(&self, status: StatusCode, body: String) -> ProviderErrorKind {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderErrorKind::Auth {
                status: status.as_u16(),
                message: body,
            },
            StatusCode::TOO_MANY_REQUESTS => ProviderErrorKind::RateLimited(body),
            StatusCode::REQUEST_TIMEOUT => ProviderErrorKind::Timeout(self.timeout.as_secs()),
            status if status.is_server_error() => ProviderErrorKind::ServerError {
                status: status.as_u16(),
                message: body,
            },
            status => ProviderErrorKind::MalformedRequest {
                status: status.as_u16(),
                message: body,
            },
        }
    }
}

#[async_trait]
impl ProviderClient for ChatClient {
    #[instrument(skip(self, request), fields(provider = %self.provider_name, model = %self.model))]
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.kind.base_url());
        let body = self.convert_request(request);
        debug!(url = %url, "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Chat completion request failed to send");
                if e.is_timeout() {
                    ProviderError::new(ProviderErrorKind::Timeout(self.timeout.as_secs()))
                } else {
                    ProviderError::new(ProviderErrorKind::Network(e.to_string()))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Provider returned error status");
            return Err(ProviderError::new(self.classify_status(status, body)));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to decode chat completion response");
            ProviderError::new(ProviderErrorKind::Decode(e.to_string()))
        })?;

        let content = chat_response
            .first_content()
            .ok_or_else(|| ProviderError::new(ProviderErrorKind::EmptyResponse))?;

        debug!(content_len = content.len(), "Received completion");
        Ok(content.to_string())
    }

    fn provider_name(&self) -> &str {
        &self.provider_name
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(kind: ProviderKind) -> ChatClient {
        ChatClient::new(kind, "test-key", None, Duration::from_secs(5))
    }

    #[test]
    fn json_mode_follows_provider_support() {
        let request = CompletionRequest {
            prompt: "p".to_string(),
            json_mode: true,
            ..Default::default()
        };
        assert!(
            client(ProviderKind::OpenAi)
                .convert_request(&request)
                .response_format
                .is_some()
        );
        assert!(
            client(ProviderKind::Grok)
                .convert_request(&request)
                .response_format
                .is_none()
        );
    }

    #[test]
    fn system_message_precedes_prompt() {
        let request = CompletionRequest {
            system: Some("be terse".to_string()),
            prompt: "hello".to_string(),
            ..Default::default()
        };
        let wire = client(ProviderKind::DeepSeek).convert_request(&request);
        assert_eq!(wire.messages.len(), 2);
        assert_eq!(wire.messages[0].role, "system");
        assert_eq!(wire.messages[1].role, "user");
    }

    #[test]
    fn rate_limit_status_is_transient() {
        let kind = client(ProviderKind::OpenAi)
            .classify_status(StatusCode::TOO_MANY_REQUESTS, "slow down".to_string());
        assert!(kind.is_transient());
    }

    #[test]
    fn auth_status_is_fatal() {
        let kind = client(ProviderKind::OpenAi)
            .classify_status(StatusCode::UNAUTHORIZED, "bad key".to_string());
        assert!(!kind.is_transient());
    }
}
