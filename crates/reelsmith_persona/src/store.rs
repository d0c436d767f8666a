//! File-per-persona store.

use crate::learning::infer_patterns;
use crate::style::render_summary;
use chrono::NaiveDate;
use reelsmith_core::{EngagementMetrics, PatternSet, Persona, Reel};
use reelsmith_error::{
    PersonaError, PersonaErrorKind, ReelsmithResult, StorageError, StorageErrorKind,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Directory of persona files, one `{persona_id}.json` each.
///
/// The persona id doubles as the filename stem, so ids are restricted to
/// filesystem-safe characters. All writes are whole-file temp-and-rename.
#[derive(Debug, Clone)]
pub struct PersonaStore {
    dir: PathBuf,
}

impl PersonaStore {
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

    /// Creates and persists a persona with the default structure.
    ///
    /// # Errors
    ///
    /// Fails with `AlreadyExists` when a persona file for the id is
    /// present; creation never overwrites.
    #[instrument(skip(self, name, niche, target_audience))]
    pub async fn create(
        &self,
        persona_id: &str,
        name: impl Into<String>,
        niche: impl Into<String>,
        target_audience: impl Into<String>,
    ) -> ReelsmithResult<Persona> {
        let path = self.path_for(persona_id)?;
        if path.exists() {
            return Err(
                PersonaError::new(PersonaErrorKind::AlreadyExists(persona_id.to_string())).into(),
            );
        }
        let persona = Persona::new(persona_id, name, niche, target_audience);
        self.save(&persona).await?;
        info!(persona_id = %persona_id, "Created persona");
        Ok(persona)
    }

    /// Loads a persona by id.
    #[instrument(skip(self))]
    pub async fn load(&self, persona_id: &str) -> ReelsmithResult<Persona> {
        let path = self.path_for(persona_id)?;
        let body = match tokio::fs::read(&path).await {
            Ok(body) => body,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(
                    PersonaError::new(PersonaErrorKind::NotFound(persona_id.to_string())).into(),
                );
            }
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
                .into());
            }
        };
        let persona: Persona = serde_json::from_slice(&body).map_err(|e| {
            PersonaError::new(PersonaErrorKind::InvalidFile {
                id: persona_id.to_string(),
                reason: e.to_string(),
            })
        })?;
        Ok(persona)
    }

    /// Persists a persona, replacing its file atomically.
    #[instrument(skip(self, persona), fields(persona_id = %persona.persona_id))]
    pub async fn save(&self, persona: &Persona) -> ReelsmithResult<()> {
        let path = self.path_for(&persona.persona_id)?;
        let body = serde_json::to_vec_pretty(persona)
            .map_err(|e| StorageError::new(StorageErrorKind::Serialization(e.to_string())))?;

        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, &body).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;
        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;
        debug!(path = %path.display(), "Saved persona");
        Ok(())
    }

    /// Lists persona ids present in the store, sorted.
    pub async fn list(&self) -> ReelsmithResult<Vec<String>> {
        let mut read_dir = tokio::fs::read_dir(&self.dir).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                self.dir.display(),
                e
            )))
        })?;
        let mut ids = Vec::new();
        while let Some(entry) = read_dir
            .next_entry()
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::FileRead(e.to_string())))?
        {
            let name = entry.file_name();
            if let Some(stem) = name.to_str().and_then(|n| n.strip_suffix(".json")) {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Appends a reel to history, recomputes patterns, and saves.
    ///
    /// The reel id is the next sequence number (`reel_001`, `reel_002`,
    /// ...). Prior history entries are never touched.
    #[instrument(skip(self, title, script))]
    pub async fn add_reel(
        &self,
        persona_id: &str,
        title: impl Into<String>,
        script: impl Into<String>,
        engagement: EngagementMetrics,
        posted_on: NaiveDate,
    ) -> ReelsmithResult<Reel> {
        let mut persona = self.load(persona_id).await?;
        let reel = Reel {
            id: format!("reel_{:03}", persona.existing_reels.len() + 1),
            title: title.into(),
            script: script.into(),
            engagement,
            posted_on,
            performance_notes: String::new(),
        };
        persona.existing_reels.push(reel.clone());
        persona.learned_patterns = infer_patterns(&persona);
        self.save(&persona).await?;
        info!(persona_id = %persona_id, reel_id = %reel.id, "Added reel to history");
        Ok(reel)
    }

    /// Replaces a reel's engagement counters, recomputes patterns, saves.
    #[instrument(skip(self))]
    pub async fn update_engagement(
        &self,
        persona_id: &str,
        reel_id: &str,
        engagement: EngagementMetrics,
    ) -> ReelsmithResult<()> {
        let mut persona = self.load(persona_id).await?;
        let reel = persona
            .existing_reels
            .iter_mut()
            .find(|r| r.id == reel_id)
            .ok_or_else(|| {
                PersonaError::new(PersonaErrorKind::ReelNotFound {
                    persona_id: persona_id.to_string(),
                    reel_id: reel_id.to_string(),
                })
            })?;
        reel.engagement = engagement;
        persona.learned_patterns = infer_patterns(&persona);
        self.save(&persona).await?;
        Ok(())
    }

    /// The persona's markdown style briefing.
    pub async fn style_summary(&self, persona_id: &str) -> ReelsmithResult<String> {
        let persona = self.load(persona_id).await?;
        Ok(render_summary(&persona))
    }

    /// The persona's pattern set, inferred fresh from its current history.
    ///
    /// Always recomputed rather than read back from the file, so history
    /// edited through [`Self::save`] or outside the store still yields
    /// patterns that match what is on disk.
    pub async fn learned_patterns(&self, persona_id: &str) -> ReelsmithResult<PatternSet> {
        let persona = self.load(persona_id).await?;
        Ok(infer_patterns(&persona))
    }

    fn path_for(&self, persona_id: &str) -> Result<PathBuf, PersonaError> {
        if persona_id.is_empty()
            || !persona_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(PersonaError::new(PersonaErrorKind::InvalidId(
                persona_id.to_string(),
            )));
        }
        Ok(self.dir.join(format!("{persona_id}.json")))
    }
}
