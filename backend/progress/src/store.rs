use std::sync::{Arc, RwLock};

use anyhow::Result;
use async_trait::async_trait;

use crate::stats::UserStats;

/// Abstract interface for stats persistence.
#[async_trait]
pub trait StatsStore: Send + Sync {
    async fn load(&self) -> Result<UserStats>;

    async fn save(&self, stats: &UserStats) -> Result<()>;
}

/// Simple in-memory store for testing.
pub struct InMemoryStatsStore {
    stats: Arc<RwLock<UserStats>>,
}

impl InMemoryStatsStore {
    pub fn new() -> Self {
        Self {
            stats: Arc::new(RwLock::new(UserStats::default())),
        }
    }
}

impl Default for InMemoryStatsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatsStore for InMemoryStatsStore {
    async fn load(&self) -> Result<UserStats> {
        let stats = self.stats.read().unwrap();
        Ok(stats.clone())
    }

    async fn save(&self, stats: &UserStats) -> Result<()> {
        let mut slot = self.stats.write().unwrap();
        *slot = stats.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_roundtrip() {
        let store = InMemoryStatsStore::new();
        let mut stats = store.load().await.unwrap();
        stats.xp = 300;
        stats.achievements.push("First Blood".to_string());
        store.save(&stats).await.unwrap();

        let reloaded = store.load().await.unwrap();
        assert_eq!(reloaded.xp, 300);
        assert!(reloaded.has_achievement("First Blood"));
    }
}
