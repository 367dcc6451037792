//! Stats file read/write with atomic backup.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};

use crate::stats::UserStats;
use crate::store::StatsStore;

/// JSON-backed stats store, one file per student.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StatsStore for JsonFileStore {
    /// Missing or unreadable files start the student from zero rather
    /// than blocking the solve flow.
    async fn load(&self) -> Result<UserStats> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Stats file does not exist; using defaults");
            return Ok(UserStats::default());
        }

        let raw = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read stats file: {}", self.path.display()))?;

        match serde_json::from_str(&raw) {
            Ok(stats) => Ok(stats),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Stats file corrupt; starting fresh");
                Ok(UserStats::default())
            }
        }
    }

    /// Write to temp file, then rename for atomicity. The previous file
    /// is kept as a `.bak` sibling.
    async fn save(&self, stats: &UserStats) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create stats directory: {}", parent.display())
            })?;
        }

        if self.path.exists() {
            let bak = self.path.with_extension("json.bak");
            if let Err(e) = fs::copy(&self.path, &bak).await {
                warn!("Failed to back up stats {}: {}", bak.display(), e);
            }
        }

        let json =
            serde_json::to_string_pretty(stats).context("Failed to serialize stats to JSON")?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json.as_bytes())
            .await
            .with_context(|| format!("Failed to write temp stats: {}", tmp_path.display()))?;

        fs::rename(&tmp_path, &self.path)
            .await
            .with_context(|| format!("Failed to rename temp stats to: {}", self.path.display()))?;

        debug!(path = %self.path.display(), "Wrote stats");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "tutorforge-progress-{}-{}.json",
            name,
            std::process::id()
        ))
    }

    #[tokio::test]
    async fn test_missing_file_loads_defaults() {
        let store = JsonFileStore::new(scratch_file("missing"));
        let stats = store.load().await.unwrap();
        assert_eq!(stats.total_solved, 0);
    }

    #[tokio::test]
    async fn test_save_then_load_roundtrip() {
        let path = scratch_file("roundtrip");
        let store = JsonFileStore::new(&path);

        let mut stats = UserStats::default();
        stats.total_solved = 4;
        stats.mastery.insert("Algebra".to_string(), 35.0);
        store.save(&stats).await.unwrap();

        let reloaded = store.load().await.unwrap();
        assert_eq!(reloaded.total_solved, 4);
        assert_eq!(reloaded.mastery_for("Algebra"), 35.0);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_corrupt_file_starts_fresh() {
        let path = scratch_file("corrupt");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::new(&path);
        let stats = store.load().await.unwrap();
        assert_eq!(stats.xp, 0);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_second_save_keeps_backup() {
        let path = scratch_file("backup");
        let store = JsonFileStore::new(&path);

        let mut stats = UserStats::default();
        stats.xp = 100;
        store.save(&stats).await.unwrap();
        stats.xp = 250;
        store.save(&stats).await.unwrap();

        let bak = path.with_extension("json.bak");
        assert!(bak.exists());
        let old: UserStats =
            serde_json::from_str(&std::fs::read_to_string(&bak).unwrap()).unwrap();
        assert_eq!(old.xp, 100);

        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_file(&bak);
    }
}
