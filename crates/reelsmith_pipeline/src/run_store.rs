//! Persisted content runs and review actions.

use reelsmith_core::{ContentRun, ReviewState};
use reelsmith_error::{
    PipelineError, PipelineErrorKind, ReelsmithResult, StorageError, StorageErrorKind,
};
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Which generated item a review action targets, by idea id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewTarget {
    /// The idea itself
    Idea(u32),
    /// The script written for an idea
    Script(u32),
    /// The visual direction produced for an idea
    Visual(u32),
}

/// A review decision.
///
/// All three variants leave the generated fields untouched; an edit stores
/// its replacement values beside the originals in the item's review state.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewAction {
    /// Accept as generated
    Approve {
        /// Optional reviewer note
        note: Option<String>,
    },
    /// Reject; the item stays in the run
    Reject {
        /// Optional reviewer note
        note: Option<String>,
    },
    /// Replace selected fields, originals retained
    Edit {
        /// Replacement field values
        fields: JsonValue,
        /// Optional reviewer note
        note: Option<String>,
    },
}

impl ReviewAction {
    fn apply(self, state: &mut ReviewState) {
        match self {
            Self::Approve { note } => state.approve(note),
            Self::Reject { note } => state.reject(note),
            Self::Edit { fields, note } => state.edit(fields, note),
        }
    }
}

/// Directory of run files, one per pipeline execution.
///
/// Filenames follow `{date}_{HHMMSS}_{persona_id}_content.json`. A run
/// file is written atomically and only ever rewritten whole, by a review
/// action updating an item's review state.
#[derive(Debug, Clone)]
pub struct RunStore {
    dir: PathBuf,
}

impl RunStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> ReelsmithResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                dir.display(),
                e
            )))
        })?;
        Ok(Self { dir })
    }

    /// The store directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persists a run, returning the path written.
    #[instrument(skip(self, run), fields(run_id = %run.run_id, persona_id = %run.persona_id))]
    pub async fn save(&self, run: &ContentRun) -> ReelsmithResult<PathBuf> {
        let stem = format!(
            "{}_{}_{}_content",
            run.date.format("%Y-%m-%d"),
            run.metadata.started_at.format("%H%M%S"),
            run.persona_id
        );
        let mut path = self.dir.join(format!("{stem}.json"));
        let mut counter = 1u32;
        while path.exists() {
            path = self.dir.join(format!("{stem}_{counter}.json"));
            counter += 1;
        }

        self.write_run(run, &path).await?;
        info!(path = %path.display(), "Persisted content run");
        Ok(path)
    }

    /// Loads the run stored at `path`.
    pub async fn load_run(&self, path: &Path) -> ReelsmithResult<ContentRun> {
        let body = tokio::fs::read(path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        let run: ContentRun = serde_json::from_slice(&body).map_err(|e| {
            StorageError::new(StorageErrorKind::Deserialization(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        Ok(run)
    }

    /// Finds a run by id, scanning the store directory.
    pub async fn find_by_id(&self, run_id: Uuid) -> ReelsmithResult<Option<(PathBuf, ContentRun)>> {
        for path in self.run_paths().await? {
            match self.load_run(&path).await {
                Ok(run) if run.run_id == run_id => return Ok(Some((path, run))),
                Ok(_) => {}
                Err(e) => {
                    // A single unreadable file should not hide the others.
                    debug!(path = %path.display(), error = %e, "Skipping unreadable run file");
                }
            }
        }
        Ok(None)
    }

    /// Applies a review action to one item in a persisted run.
    ///
    /// Only the item's review state changes; for an edit, the replacement
    /// values are stored beside the original generated fields. The whole
    /// run file is rewritten atomically. Returns the updated run.
    #[instrument(skip(self, action))]
    pub async fn review(
        &self,
        run_id: Uuid,
        target: ReviewTarget,
        action: ReviewAction,
    ) -> ReelsmithResult<ContentRun> {
        let Some((path, mut run)) = self.find_by_id(run_id).await? else {
            return Err(StorageError::new(StorageErrorKind::NotFound(format!(
                "run {run_id}"
            )))
            .into());
        };

        let state = match target {
            ReviewTarget::Idea(idea_id) => run
                .ideas
                .iter_mut()
                .find(|i| i.id == idea_id)
                .map(|i| &mut i.review),
            ReviewTarget::Script(idea_id) => run
                .scripts
                .iter_mut()
                .find(|s| s.idea_id == idea_id)
                .map(|s| &mut s.review),
            ReviewTarget::Visual(idea_id) => run
                .visuals
                .iter_mut()
                .find(|v| v.idea_id == idea_id)
                .map(|v| &mut v.review),
        };
        let Some(state) = state else {
            return Err(PipelineError::new(PipelineErrorKind::ReviewTargetNotFound(
                format!("{target:?} in run {run_id}"),
            ))
            .into());
        };
        action.apply(state);

        self.write_run(&run, &path).await?;
        info!(run_id = %run_id, "Applied review action");
        Ok(run)
    }

    /// Paths of all run files in the store.
    pub async fn run_paths(&self) -> ReelsmithResult<Vec<PathBuf>> {
        let mut read_dir = tokio::fs::read_dir(&self.dir).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                self.dir.display(),
                e
            )))
        })?;
        let mut paths = Vec::new();
        while let Some(entry) = read_dir
            .next_entry()
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::FileRead(e.to_string())))?
        {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    async fn write_run(&self, run: &ContentRun, path: &Path) -> ReelsmithResult<()> {
        let body = serde_json::to_vec_pretty(run)
            .map_err(|e| StorageError::new(StorageErrorKind::Serialization(e.to_string())))?;
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, &body).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;
        tokio::fs::rename(&temp_path, path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;
        Ok(())
    }
}
