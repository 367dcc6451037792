//! Gamification math applied when a question is solved.
//!
//! The caller passes today's date so every rule stays testable without
//! touching the system clock.

use chrono::NaiveDate;
use tracing::{debug, info};
use tutorforge_core::DifficultyLevel;

use crate::stats::{Streak, UserStats};

const XP_BASE: f64 = 100.0;

/// Records one solved question and returns any newly unlocked achievements.
pub fn record_solution(
    stats: &mut UserStats,
    subject: &str,
    difficulty: DifficultyLevel,
    today: NaiveDate,
) -> Vec<String> {
    update_streak(&mut stats.streak, today);
    stats.total_solved += 1;

    let multiplier = difficulty.reward_multiplier();
    let gained = (XP_BASE * multiplier).round() as u64;
    stats.xp += gained;

    let current = stats.mastery_for(subject);
    let increment = (10.0 * multiplier * (1.0 - current / 100.0)).round().max(1.0);
    stats
        .mastery
        .insert(subject.to_string(), (current + increment).min(100.0));

    debug!(
        "[Progress] Recorded {} solve: +{} XP, mastery {:.0}",
        subject,
        gained,
        stats.mastery_for(subject)
    );
    unlock_achievements(stats, subject)
}

/// First activity starts at 1, a solve the day after extends the run,
/// repeated solves on the same day change nothing, and a gap resets to 1.
fn update_streak(streak: &mut Streak, today: NaiveDate) {
    let yesterday = today.pred_opt();
    match streak.last_active_date {
        Some(last) if last == today => {}
        Some(last) if Some(last) == yesterday => streak.current += 1,
        _ => streak.current = 1,
    }
    streak.last_active_date = Some(today);
}

fn unlock_achievements(stats: &mut UserStats, subject: &str) -> Vec<String> {
    let mastery = stats.mastery_for(subject);
    let mut earned: Vec<String> = Vec::new();
    if stats.total_solved >= 1 {
        earned.push("First Blood".to_string());
    }
    if stats.total_solved >= 10 {
        earned.push("Problem Solver".to_string());
    }
    if stats.streak.current >= 3 {
        earned.push("On Fire".to_string());
    }
    if stats.streak.current >= 7 {
        earned.push("Week Warrior".to_string());
    }
    if mastery >= 50.0 {
        earned.push(format!("{} Apprentice", subject));
    }
    if mastery >= 90.0 {
        earned.push(format!("{} Master", subject));
    }

    let mut unlocked = Vec::new();
    for name in earned {
        if !stats.has_achievement(&name) {
            info!("[Progress] Achievement unlocked: {}", name);
            stats.achievements.push(name.clone());
            unlocked.push(name);
        }
    }
    unlocked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).expect("valid date")
    }

    #[test]
    fn test_first_solve_starts_streak() {
        let mut stats = UserStats::default();
        record_solution(&mut stats, "Algebra", DifficultyLevel::Easy, day(10));
        assert_eq!(stats.streak.current, 1);
        assert_eq!(stats.streak.last_active_date, Some(day(10)));
    }

    #[test]
    fn test_consecutive_day_extends_streak() {
        let mut stats = UserStats::default();
        record_solution(&mut stats, "Algebra", DifficultyLevel::Easy, day(10));
        record_solution(&mut stats, "Algebra", DifficultyLevel::Easy, day(11));
        assert_eq!(stats.streak.current, 2);
    }

    #[test]
    fn test_same_day_leaves_streak_alone() {
        let mut stats = UserStats::default();
        record_solution(&mut stats, "Algebra", DifficultyLevel::Easy, day(10));
        record_solution(&mut stats, "Algebra", DifficultyLevel::Easy, day(10));
        assert_eq!(stats.streak.current, 1);
        assert_eq!(stats.total_solved, 2);
    }

    #[test]
    fn test_gap_resets_streak() {
        let mut stats = UserStats::default();
        record_solution(&mut stats, "Algebra", DifficultyLevel::Easy, day(10));
        record_solution(&mut stats, "Algebra", DifficultyLevel::Easy, day(11));
        record_solution(&mut stats, "Algebra", DifficultyLevel::Easy, day(14));
        assert_eq!(stats.streak.current, 1);
    }

    #[test]
    fn test_xp_scales_with_difficulty() {
        let mut stats = UserStats::default();
        record_solution(&mut stats, "Algebra", DifficultyLevel::Easy, day(10));
        assert_eq!(stats.xp, 100);
        record_solution(&mut stats, "Algebra", DifficultyLevel::Medium, day(10));
        assert_eq!(stats.xp, 250);
        record_solution(&mut stats, "Algebra", DifficultyLevel::VeryHard, day(10));
        assert_eq!(stats.xp, 450);
    }

    #[test]
    fn test_mastery_growth_slows_near_the_top() {
        let mut stats = UserStats::default();
        record_solution(&mut stats, "Physics", DifficultyLevel::Easy, day(10));
        assert_eq!(stats.mastery_for("Physics"), 10.0);

        stats.mastery.insert("Physics".to_string(), 95.0);
        record_solution(&mut stats, "Physics", DifficultyLevel::Easy, day(10));
        assert_eq!(stats.mastery_for("Physics"), 96.0);
    }

    #[test]
    fn test_mastery_caps_at_hundred() {
        let mut stats = UserStats::default();
        stats.mastery.insert("Physics".to_string(), 100.0);
        record_solution(&mut stats, "Physics", DifficultyLevel::Hard, day(10));
        assert_eq!(stats.mastery_for("Physics"), 100.0);
    }

    #[test]
    fn test_first_blood_unlocks_once() {
        let mut stats = UserStats::default();
        let unlocked = record_solution(&mut stats, "Algebra", DifficultyLevel::Easy, day(10));
        assert_eq!(unlocked, vec!["First Blood".to_string()]);
        let unlocked = record_solution(&mut stats, "Algebra", DifficultyLevel::Easy, day(10));
        assert!(unlocked.is_empty());
        assert_eq!(stats.achievements, vec!["First Blood".to_string()]);
    }

    #[test]
    fn test_streak_achievements() {
        let mut stats = UserStats::default();
        for d in 10..=16 {
            record_solution(&mut stats, "Algebra", DifficultyLevel::Easy, day(d));
        }
        assert_eq!(stats.streak.current, 7);
        assert!(stats.has_achievement("On Fire"));
        assert!(stats.has_achievement("Week Warrior"));
    }

    #[test]
    fn test_subject_mastery_achievements() {
        let mut stats = UserStats::default();
        stats.mastery.insert("Chemistry".to_string(), 49.0);
        let unlocked = record_solution(&mut stats, "Chemistry", DifficultyLevel::Hard, day(10));
        assert!(unlocked.contains(&"Chemistry Apprentice".to_string()));

        stats.mastery.insert("Chemistry".to_string(), 89.0);
        let unlocked = record_solution(&mut stats, "Chemistry", DifficultyLevel::Hard, day(10));
        assert!(unlocked.contains(&"Chemistry Master".to_string()));
    }
}
