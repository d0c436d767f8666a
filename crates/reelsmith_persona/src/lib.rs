//! Persona storage and the learning model.
//!
//! One JSON file per persona under a store directory. Besides explicit
//! style edits through [`PersonaStore::save`], the only mutations are
//! appending a reel to history and updating a reel's engagement counters;
//! both recompute the persona's learned patterns wholesale before saving,
//! so patterns are always consistent with the history they summarize.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod learning;
mod store;
pub mod style;

pub use store::PersonaStore;
