//! Non-destructive review state for generated items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Review status of a generated item.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReviewStatus {
    /// Not yet reviewed
    #[default]
    Pending,
    /// Accepted as generated
    Approved,
    /// Rejected; the item remains in the run
    Rejected,
    /// Edited; the edit lives beside the untouched originals
    Edited,
}

/// Review metadata attached to each generated idea, script, and visual
/// suggestion.
///
/// Review actions only ever set these fields. The generated fields of the
/// item itself are preserved: an edit stores its replacement values in
/// `edit` rather than overwriting anything.
///
/// # Examples
///
/// ```
/// use reelsmith_core::{ReviewState, ReviewStatus};
///
/// let state = ReviewState::default();
/// assert_eq!(state.status, ReviewStatus::Pending);
/// assert!(state.edit.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReviewState {
    /// Current review status
    #[serde(default)]
    pub status: ReviewStatus,
    /// Optional reviewer note
    #[serde(default)]
    pub note: Option<String>,
    /// Edited field values, stored beside the originals
    #[serde(default)]
    pub edit: Option<JsonValue>,
    /// When the last review action was applied
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl ReviewState {
    /// Apply an approval.
    pub fn approve(&mut self, note: Option<String>) {
        self.status = ReviewStatus::Approved;
        self.note = note;
        self.reviewed_at = Some(Utc::now());
    }

    /// Apply a rejection.
    pub fn reject(&mut self, note: Option<String>) {
        self.status = ReviewStatus::Rejected;
        self.note = note;
        self.reviewed_at = Some(Utc::now());
    }

    /// Apply an edit, retaining the original generated fields on the item.
    pub fn edit(&mut self, fields: JsonValue, note: Option<String>) {
        self.status = ReviewStatus::Edited;
        self.edit = Some(fields);
        self.note = note;
        self.reviewed_at = Some(Utc::now());
    }
}
