//! Append-only file cache for fetched research.

use chrono::{DateTime, Utc};
use reelsmith_core::{Platform, ResearchRecord};
use reelsmith_error::{ResearchError, ResearchErrorKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

/// One immutable cache file: everything a platform returned for a niche
/// at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Platform the records came from
    pub platform: Platform,
    /// Niche the fetch was for
    pub niche: String,
    /// When the fetch happened
    pub fetched_at: DateTime<Utc>,
    /// The fetched records
    pub records: Vec<ResearchRecord>,
}

impl CacheEntry {
    /// Creates an entry stamped with the current time.
    pub fn new(platform: Platform, niche: impl Into<String>, records: Vec<ResearchRecord>) -> Self {
        Self {
            platform,
            niche: niche.into(),
            fetched_at: Utc::now(),
            records,
        }
    }

    /// Whether the entry is younger than `max_age`.
    pub fn is_fresh(&self, max_age: Duration) -> bool {
        let age = Utc::now().signed_duration_since(self.fetched_at);
        match chrono::Duration::from_std(max_age) {
            Ok(max) => age <= max,
            Err(_) => true,
        }
    }
}

/// Directory of immutable research cache files.
///
/// Each entry is one JSON file named
/// `{platform}_{niche-slug}_{unix-millis}.json`. Entries are only ever
/// appended; refreshing a niche writes a new file beside the old ones, and
/// nothing here deletes or overwrites. [`ResearchCache::latest`] picks the
/// newest entry by the timestamp baked into the filename.
#[derive(Debug, Clone)]
pub struct ResearchCache {
    dir: PathBuf,
}

impl ResearchCache {
    /// Opens a cache rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, ResearchError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            ResearchError::new(ResearchErrorKind::CacheWrite(format!(
                "{}: {}",
                dir.display(),
                e
            )))
        })?;
        Ok(Self { dir })
    }

    /// The cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Appends a new entry file.
    ///
    /// The write is temp-file + rename so readers never observe a partial
    /// entry. Existing files are never touched; a filename collision within
    /// the same millisecond bumps the timestamp component until free.
    #[instrument(skip(self, entry), fields(platform = %entry.platform, niche = %entry.niche))]
    pub async fn store(&self, entry: &CacheEntry) -> Result<PathBuf, ResearchError> {
        let body = serde_json::to_vec_pretty(entry)
            .map_err(|e| ResearchError::new(ResearchErrorKind::CacheWrite(e.to_string())))?;

        let mut millis = entry.fetched_at.timestamp_millis();
        let mut path = self.entry_path(entry.platform, &entry.niche, millis);
        while path.exists() {
            millis += 1;
            path = self.entry_path(entry.platform, &entry.niche, millis);
        }

        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, &body).await.map_err(|e| {
            ResearchError::new(ResearchErrorKind::CacheWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;
        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            ResearchError::new(ResearchErrorKind::CacheWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        debug!(path = %path.display(), records = entry.records.len(), "Stored cache entry");
        Ok(path)
    }

    /// The newest entry for a platform and niche, if any exists.
    #[instrument(skip(self))]
    pub async fn latest(
        &self,
        niche: &str,
        platform: Platform,
    ) -> Result<Option<CacheEntry>, ResearchError> {
        let prefix = format!("{}_{}_", platform, slug(niche));

        let mut read_dir = tokio::fs::read_dir(&self.dir).await.map_err(|e| {
            ResearchError::new(ResearchErrorKind::CacheRead(format!(
                "{}: {}",
                self.dir.display(),
                e
            )))
        })?;

        let mut newest: Option<(i64, PathBuf)> = None;
        while let Some(dir_entry) = read_dir.next_entry().await.map_err(|e| {
            ResearchError::new(ResearchErrorKind::CacheRead(e.to_string()))
        })? {
            let name = dir_entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(stem) = name.strip_suffix(".json") else {
                continue;
            };
            let Some(millis_str) = stem.strip_prefix(&prefix) else {
                continue;
            };
            let Ok(millis) = millis_str.parse::<i64>() else {
                continue;
            };
            if newest.as_ref().is_none_or(|(m, _)| millis > *m) {
                newest = Some((millis, dir_entry.path()));
            }
        }

        let Some((_, path)) = newest else {
            return Ok(None);
        };

        let body = tokio::fs::read(&path).await.map_err(|e| {
            ResearchError::new(ResearchErrorKind::CacheRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        let entry: CacheEntry = serde_json::from_slice(&body).map_err(|e| {
            ResearchError::new(ResearchErrorKind::CacheRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        Ok(Some(entry))
    }

    fn entry_path(&self, platform: Platform, niche: &str, millis: i64) -> PathBuf {
        self.dir
            .join(format!("{}_{}_{}.json", platform, slug(niche), millis))
    }
}

/// Filesystem-safe rendering of a niche name.
fn slug(niche: &str) -> String {
    let mut out = String::with_capacity(niche.len());
    let mut last_dash = true;
    for ch in niche.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}
