use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the solver should treat a submitted question pedagogically.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SolverMode {
    /// Full walkthrough: steps, theory, flashcards, practice material.
    #[default]
    Learning,
    /// Terse verified steps, no pedagogy.
    Exam,
    /// Guiding hints only, no worked solution.
    Hint,
    /// Theory summary and flashcards first, for review sessions.
    Revision,
}

/// Estimated difficulty of a question, ordered easiest to hardest.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyLevel {
    VeryEasy,
    Easy,
    #[default]
    Medium,
    Hard,
    VeryHard,
}

impl DifficultyLevel {
    /// Reward multiplier applied to XP and mastery gains when a question
    /// of this difficulty is solved.
    pub fn reward_multiplier(self) -> f64 {
        match self {
            DifficultyLevel::Hard | DifficultyLevel::VeryHard => 2.0,
            DifficultyLevel::Medium => 1.5,
            DifficultyLevel::VeryEasy | DifficultyLevel::Easy => 1.0,
        }
    }
}

impl fmt::Display for SolverMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolverMode::Learning => "learning",
            SolverMode::Exam => "exam",
            SolverMode::Hint => "hint",
            SolverMode::Revision => "revision",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for SolverMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "learning" => Ok(SolverMode::Learning),
            "exam" => Ok(SolverMode::Exam),
            "hint" => Ok(SolverMode::Hint),
            "revision" => Ok(SolverMode::Revision),
            other => Err(format!(
                "unknown solver mode \"{}\" (expected learning, exam, hint, or revision)",
                other
            )),
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DifficultyLevel::VeryEasy => "very easy",
            DifficultyLevel::Easy => "easy",
            DifficultyLevel::Medium => "medium",
            DifficultyLevel::Hard => "hard",
            DifficultyLevel::VeryHard => "very hard",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for DifficultyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(' ', "_").as_str() {
            "very_easy" => Ok(DifficultyLevel::VeryEasy),
            "easy" => Ok(DifficultyLevel::Easy),
            "medium" => Ok(DifficultyLevel::Medium),
            "hard" => Ok(DifficultyLevel::Hard),
            "very_hard" => Ok(DifficultyLevel::VeryHard),
            other => Err(format!("unknown difficulty level \"{}\"", other)),
        }
    }
}
