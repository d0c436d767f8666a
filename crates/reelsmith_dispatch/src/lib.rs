//! Multi-provider AI dispatch for the Reelsmith content engine.
//!
//! This crate turns a prompt into parsed JSON by walking an ordered list of
//! chat-completion providers. Each provider is retried with exponential
//! backoff on transient failures; fatal failures skip straight to the next
//! provider in the fallback order. When every provider has been exhausted,
//! the caller receives one failure reason per provider attempted.
//!
//! # Architecture
//!
//! - [`ProviderClient`] is the seam: an object-safe async trait over a raw
//!   text completion. [`ChatClient`] implements it for the OpenAI-compatible
//!   wire format shared by all supported providers.
//! - [`Dispatcher`] owns the fallback order and the retry policy. It never
//!   caches and never persists; callers own both concerns.
//! - [`extract_json`] recovers JSON from responses that wrap it in markdown
//!   fences or surrounding prose.
//!
//! # Examples
//!
//! ```no_run
//! use reelsmith_dispatch::{
//!     Dispatcher, DispatchConfig, GenerateParams, ProviderKind, ProviderSettings,
//!     ResponseShape, RetryPolicy,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DispatchConfig {
//!     providers: vec![ProviderSettings {
//!         kind: ProviderKind::OpenAi,
//!         api_key: "sk-...".to_string(),
//!         model: None,
//!     }],
//!     default_provider: ProviderKind::OpenAi,
//!     retry: RetryPolicy::default(),
//! };
//! let dispatcher = Dispatcher::from_config(&config);
//!
//! let params = GenerateParams::builder()
//!     .prompt("List three reel hooks as a JSON array of strings.")
//!     .shape(ResponseShape::Array)
//!     .build()?;
//! let value = dispatcher.generate(&params).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod dispatcher;
mod extraction;
mod params;
mod provider;
mod wire;

pub use client::ChatClient;
pub use config::{DispatchConfig, ProviderSettings, RetryPolicy};
pub use dispatcher::Dispatcher;
pub use extraction::extract_json;
pub use params::{GenerateParams, GenerateParamsBuilder, GenerateParamsBuilderError, ResponseShape};
pub use provider::{CompletionRequest, ProviderClient, ProviderKind};
