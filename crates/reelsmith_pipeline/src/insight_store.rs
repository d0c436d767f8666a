//! Persisted insight reports, one directory per persona.

use reelsmith_core::InsightReport;
use reelsmith_error::{ReelsmithResult, StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Directory of insight reports, grouped as `{persona_id}/{stamp}_insights.json`.
///
/// Reports are append-only: a new analysis writes a new timestamped file
/// and never touches earlier ones. Filenames sort chronologically, so the
/// lexicographically greatest file in a persona's directory is the latest
/// report.
#[derive(Debug, Clone)]
pub struct InsightStore {
    dir: PathBuf,
}

impl InsightStore {
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

    /// Persists a report, returning the path written.
    #[instrument(skip(self, report), fields(persona_id = %report.persona_id))]
    pub async fn save(&self, report: &InsightReport) -> ReelsmithResult<PathBuf> {
        let persona_dir = self.dir.join(&report.persona_id);
        tokio::fs::create_dir_all(&persona_dir).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                persona_dir.display(),
                e
            )))
        })?;

        let stem = format!(
            "{}_insights",
            report.generated_at.format("%Y-%m-%d_%H%M%S")
        );
        let mut path = persona_dir.join(format!("{stem}.json"));
        let mut counter = 1u32;
        while path.exists() {
            path = persona_dir.join(format!("{stem}_{counter}.json"));
            counter += 1;
        }

        let body = serde_json::to_vec_pretty(report)
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

        info!(path = %path.display(), "Persisted insight report");
        Ok(path)
    }

    /// The most recent report for a persona, if any.
    pub async fn latest(&self, persona_id: &str) -> ReelsmithResult<Option<InsightReport>> {
        let paths = self.report_paths(persona_id).await?;
        let Some(path) = paths.last() else {
            return Ok(None);
        };
        Ok(Some(self.load_report(path).await?))
    }

    /// All reports for a persona, newest first.
    pub async fn list(&self, persona_id: &str) -> ReelsmithResult<Vec<InsightReport>> {
        let mut reports = Vec::new();
        for path in self.report_paths(persona_id).await?.iter().rev() {
            match self.load_report(path).await {
                Ok(report) => reports.push(report),
                Err(e) => {
                    // A single unreadable file should not hide the others.
                    debug!(path = %path.display(), error = %e, "Skipping unreadable insight file");
                }
            }
        }
        Ok(reports)
    }

    /// Report file paths for a persona, oldest first.
    async fn report_paths(&self, persona_id: &str) -> ReelsmithResult<Vec<PathBuf>> {
        let persona_dir = self.dir.join(persona_id);
        let mut read_dir = match tokio::fs::read_dir(&persona_dir).await {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    persona_dir.display(),
                    e
                )))
                .into());
            }
        };
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

    async fn load_report(&self, path: &Path) -> ReelsmithResult<InsightReport> {
        let body = tokio::fs::read(path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        let report: InsightReport = serde_json::from_slice(&body).map_err(|e| {
            StorageError::new(StorageErrorKind::Deserialization(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        Ok(report)
    }
}
