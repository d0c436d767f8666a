//! Error types for the Reelsmith content engine.
//!
//! This crate provides the foundation error types used throughout the
//! Reelsmith workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use reelsmith_error::{ReelsmithResult, ConfigError};
//!
//! fn load_settings() -> ReelsmithResult<String> {
//!     Err(ConfigError::new("Missing provider list"))?
//! }
//!
//! match load_settings() {
//!     Ok(settings) => println!("Got: {}", settings),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod dispatch;
mod error;
mod job;
mod persona;
mod pipeline;
mod provider;
mod research;
mod storage;

pub use config::ConfigError;
pub use dispatch::{DispatchError, DispatchErrorKind, ProviderFailure};
pub use error::{ReelsmithError, ReelsmithErrorKind, ReelsmithResult};
pub use job::{JobError, JobErrorKind};
pub use persona::{PersonaError, PersonaErrorKind};
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use provider::{ProviderError, ProviderErrorKind};
pub use research::{ResearchError, ResearchErrorKind};
pub use storage::{StorageError, StorageErrorKind};
