//! Persisted study-progress counters.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Everything the progress file tracks for one student.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStats {
    pub total_solved: u64,
    pub xp: u64,
    pub streak: Streak,
    /// Per-subject mastery on a 0..100 scale.
    pub mastery: HashMap<String, f64>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Streak {
    pub current: u32,
    pub last_active_date: Option<NaiveDate>,
}

impl UserStats {
    pub fn mastery_for(&self, subject: &str) -> f64 {
        self.mastery.get(subject).copied().unwrap_or(0.0)
    }

    pub fn has_achievement(&self, name: &str) -> bool {
        self.achievements.iter().any(|a| a == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_zeroed() {
        let stats = UserStats::default();
        assert_eq!(stats.total_solved, 0);
        assert_eq!(stats.xp, 0);
        assert_eq!(stats.streak.current, 0);
        assert!(stats.streak.last_active_date.is_none());
        assert!(stats.mastery.is_empty());
        assert!(stats.achievements.is_empty());
    }

    #[test]
    fn test_serialized_form_is_camel_case() {
        let mut stats = UserStats::default();
        stats.total_solved = 3;
        stats.streak.current = 2;
        stats.streak.last_active_date = NaiveDate::from_ymd_opt(2026, 8, 21);
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"totalSolved\":3"));
        assert!(json.contains("\"lastActiveDate\":\"2026-08-21\""));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let stats: UserStats = serde_json::from_str(r#"{"xp": 450}"#).unwrap();
        assert_eq!(stats.xp, 450);
        assert_eq!(stats.total_solved, 0);
        assert!(stats.achievements.is_empty());
    }
}
