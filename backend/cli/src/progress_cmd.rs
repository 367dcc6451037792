//! `progress` command: show or reset study stats.

use std::cmp::Ordering;
use std::path::PathBuf;

use anyhow::Result;
use tutorforge_progress::{JsonFileStore, StatsStore, UserStats};

use crate::terminal::{self, render_table, Column};

pub async fn run(stats_path: PathBuf, reset: bool) -> Result<()> {
    let store = JsonFileStore::new(stats_path);
    if reset {
        store.save(&UserStats::default()).await?;
        terminal::note_success("Progress reset");
        return Ok(());
    }

    let stats = store.load().await?;
    let streak = match stats.streak.last_active_date {
        Some(date) => format!("{} day(s), last active {}", stats.streak.current, date),
        None => "0 days".to_string(),
    };
    print!(
        "{}",
        render_table(
            &[Column::left("Stat"), Column::right("Value")],
            &[
                vec!["XP".to_string(), stats.xp.to_string()],
                vec!["Solved".to_string(), stats.total_solved.to_string()],
                vec!["Streak".to_string(), streak],
            ],
        )
    );

    if !stats.mastery.is_empty() {
        let mut subjects: Vec<_> = stats.mastery.iter().collect();
        subjects.sort_by(|a, b| {
            b.1.partial_cmp(a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        let rows: Vec<Vec<String>> = subjects
            .into_iter()
            .map(|(subject, mastery)| vec![subject.clone(), format!("{:.0}", mastery)])
            .collect();
        println!();
        print!(
            "{}",
            render_table(&[Column::left("Subject"), Column::right("Mastery")], &rows)
        );
    }

    if !stats.achievements.is_empty() {
        println!("\nAchievements: {}", stats.achievements.join(", "));
    }
    Ok(())
}
