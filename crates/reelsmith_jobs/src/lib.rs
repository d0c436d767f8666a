//! Asynchronous background execution of content generation.
//!
//! Callers enqueue a job and poll its status instead of awaiting the
//! pipeline inline. Worker tasks pull jobs off a queue, drive the
//! pipeline, and advance a coarse progress fraction at each stage
//! boundary. Job records live in memory only; a restart forgets them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod engine;

pub use engine::JobEngine;
