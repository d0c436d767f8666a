//! Layered configuration: bundled defaults, optional file, environment.

use config::{Config, Environment, File, FileFormat};
use reelsmith_dispatch::{DispatchConfig, ProviderKind};
use reelsmith_error::{ConfigError, ReelsmithResult};
use reelsmith_pipeline::RunRequest;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

// Bundled default configuration
const DEFAULT_CONFIG: &str = include_str!("../reelsmith.toml");

/// Where the stores keep their files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Persona files, one JSON file per persona
    pub personas_dir: PathBuf,
    /// Append-only research cache entries
    pub research_cache_dir: PathBuf,
    /// Persisted content runs
    pub runs_dir: PathBuf,
    /// Persisted insight reports, one subdirectory per persona
    pub insights_dir: PathBuf,
    /// Prompt template overrides; `None` uses the compiled-in templates
    #[serde(default)]
    pub prompts_dir: Option<PathBuf>,
}

/// Default knobs for pipeline runs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PipelineDefaults {
    /// Ideas requested per run
    pub ideas_count: u32,
    /// Research cache freshness window
    pub max_research_age_secs: u64,
    /// Bypass research entirely
    #[serde(default)]
    pub skip_research: bool,
    /// Run the scripting stage
    pub generate_scripts: bool,
    /// Run the visuals stage
    pub generate_visuals: bool,
}

impl PipelineDefaults {
    /// A run request for `persona_id` using these defaults.
    pub fn run_request(&self, persona_id: impl Into<String>) -> RunRequest {
        let mut request = RunRequest::new(persona_id, self.ideas_count);
        request.skip_research = self.skip_research;
        request.max_research_age = Duration::from_secs(self.max_research_age_secs);
        request.generate_scripts = self.generate_scripts;
        request.generate_visuals = self.generate_visuals;
        request
    }
}

/// Full application configuration.
///
/// Sources are layered in precedence order: bundled defaults, then an
/// optional `reelsmith.toml`, then `REELSMITH__*` environment variables.
///
/// # Examples
///
/// ```no_run
/// use reelsmith::ReelsmithConfig;
///
/// let config = ReelsmithConfig::load(None).unwrap();
/// assert!(config.pipeline.ideas_count > 0);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReelsmithConfig {
    /// Store locations
    pub storage: StorageConfig,
    /// Pipeline run defaults
    pub pipeline: PipelineDefaults,
    /// Provider chain and retry behavior
    pub dispatch: DispatchConfig,
}

/// Environment variable holding the API key for a provider.
fn api_key_var(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::OpenAi => "OPENAI_API_KEY",
        ProviderKind::DeepSeek => "DEEPSEEK_API_KEY",
        ProviderKind::Grok => "XAI_API_KEY",
    }
}

impl ReelsmithConfig {
    /// Loads configuration, reading `.env` first so API keys placed there
    /// are visible.
    ///
    /// With `path` set, that file is required; otherwise a
    /// `reelsmith.toml` in the working directory is used when present.
    ///
    /// # Errors
    ///
    /// Fails when a source cannot be read or parsed, or when no
    /// configured provider ends up with an API key.
    pub fn load(path: Option<&Path>) -> ReelsmithResult<Self> {
        let _ = dotenvy::dotenv();

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));
        builder = match path {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name("reelsmith").required(false)),
        };
        let mut config: Self = builder
            .add_source(Environment::with_prefix("REELSMITH").separator("__"))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to read configuration: {e}")))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Invalid configuration: {e}")))?;

        config.resolve_api_keys_with(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Fills empty provider API keys from the environment and drops
    /// providers that still have none.
    ///
    /// # Errors
    ///
    /// Fails when the default provider is left without a key.
    pub fn resolve_api_keys_with(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ReelsmithResult<()> {
        for provider in &mut self.dispatch.providers {
            if provider.api_key.is_empty() {
                if let Some(key) = lookup(api_key_var(provider.kind)) {
                    provider.api_key = key;
                }
            }
        }
        self.dispatch.providers.retain(|p| {
            if p.api_key.is_empty() {
                warn!(provider = %p.kind, "Dropping provider without an API key");
                false
            } else {
                true
            }
        });
        if !self
            .dispatch
            .providers
            .iter()
            .any(|p| p.kind == self.dispatch.default_provider)
        {
            return Err(ConfigError::new(format!(
                "No API key for default provider {} (set {})",
                self.dispatch.default_provider,
                api_key_var(self.dispatch.default_provider)
            ))
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> ReelsmithConfig {
        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn bundled_defaults_parse() {
        let config = defaults();
        assert_eq!(config.pipeline.ideas_count, 5);
        assert_eq!(config.pipeline.max_research_age_secs, 21_600);
        assert_eq!(config.dispatch.providers.len(), 3);
        assert_eq!(config.dispatch.default_provider, ProviderKind::OpenAi);
        assert_eq!(config.storage.personas_dir, PathBuf::from("data/personas"));
        assert_eq!(config.storage.insights_dir, PathBuf::from("data/insights"));
        assert!(config.storage.prompts_dir.is_none());
    }

    #[test]
    fn keyless_providers_are_dropped() {
        let mut config = defaults();
        config
            .resolve_api_keys_with(|var| {
                (var == "OPENAI_API_KEY" || var == "XAI_API_KEY").then(|| "k".to_string())
            })
            .unwrap();
        let kinds: Vec<ProviderKind> =
            config.dispatch.providers.iter().map(|p| p.kind).collect();
        assert_eq!(kinds, vec![ProviderKind::OpenAi, ProviderKind::Grok]);
    }

    #[test]
    fn missing_default_provider_key_is_an_error() {
        let mut config = defaults();
        let err = config
            .resolve_api_keys_with(|var| (var == "DEEPSEEK_API_KEY").then(|| "k".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn run_request_carries_the_defaults() {
        let config = defaults();
        let request = config.pipeline.run_request("sat_coach");
        assert_eq!(request.ideas_count, 5);
        assert_eq!(request.max_research_age, Duration::from_secs(21_600));
        assert!(request.generate_scripts);
        assert!(!request.skip_research);
    }
}
