//! Solver providers and the tutoring flows built on them.
//!
//! The provider trait lives in the core crate; this crate supplies the
//! Gemini implementation, the prompt that pins the solution schema, and the
//! conversational flows (Socratic chat, practice exams, attempt review)
//! that reuse the same provider.

pub mod chat;
pub mod gemini;
pub mod media;
pub mod mock;
pub mod practice;
pub mod prompt;

pub use chat::{ChatSession, GREETING};
pub use gemini::{GeminiSolver, DEFAULT_MODEL};
pub use media::{image_mime_type, load_image};
pub use mock::MockSolver;
pub use practice::{check_attempt, generate_exam, AttemptReview, ExamQuestion, PracticeExam};
pub use prompt::PromptBuilder;
