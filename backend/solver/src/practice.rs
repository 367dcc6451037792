//! Practice exam generation and student attempt review.
//!
//! Both flows ask the model for a small JSON payload and run it through the
//! same lenient decode pipeline as solution documents, so fenced or
//! under-escaped output still parses.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use tutorforge_core::{ChatMessage, SolverProvider};
use tutorforge_solution::{decode_lenient, SolutionDocument};

const JSON_ONLY: &str = "You are a strict but helpful teacher. Respond ONLY with valid JSON \
matching the requested shape. No markdown, no commentary outside the JSON.";

/// A generated mini exam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeExam {
    pub title: String,
    pub questions: Vec<ExamQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamQuestion {
    pub id: u32,
    /// Free-form label ("Easy", "Medium", "Hard").
    pub difficulty: String,
    pub text: String,
    pub answer: String,
}

/// Verdict on a student's written attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptReview {
    pub correct: bool,
    pub feedback: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correction: Option<String>,
}

/// Generates a practice exam on the solved question's subject and level.
pub async fn generate_exam(
    provider: &dyn SolverProvider,
    document: &SolutionDocument,
    count: u32,
) -> Result<PracticeExam> {
    let topic = &document.question_understanding.detected_subject;
    let level = document.difficulty.level.to_string();
    info!(
        "[Solver] Generating {}-question practice exam on {}",
        count, topic
    );
    let raw = provider
        .respond(JSON_ONLY, &[ChatMessage::user(exam_prompt(topic, &level, count))])
        .await?;
    let exam: PracticeExam =
        decode_lenient(&raw).context("Practice exam response was not usable JSON")?;
    Ok(exam)
}

/// Asks the model to locate the mistake (if any) in a student's attempt.
pub async fn check_attempt(
    provider: &dyn SolverProvider,
    question: &str,
    correct_solution: &str,
    student_attempt: &str,
) -> Result<AttemptReview> {
    info!("[Solver] Reviewing student attempt");
    let prompt = review_prompt(question, correct_solution, student_attempt);
    let raw = provider
        .respond(JSON_ONLY, &[ChatMessage::user(prompt)])
        .await?;
    let review: AttemptReview =
        decode_lenient(&raw).context("Attempt review response was not usable JSON")?;
    Ok(review)
}

fn exam_prompt(topic: &str, level: &str, count: u32) -> String {
    format!(
        "Generate a mini practice exam for topic: \"{}\" at level: \"{}\".\n\
         Create {} questions with difficulty rising from Easy to Hard.\n\
         Output JSON:\n\
         {{\n\
           \"title\": \"Practice Exam: {}\",\n\
           \"questions\": [\n\
             {{ \"id\": 1, \"difficulty\": \"Easy\", \"text\": \"...\", \"answer\": \"...\" }}\n\
           ]\n\
         }}\n\
         Wrap all math in $ delimiters and double-escape LaTeX backslashes.",
        topic, level, count, topic
    )
}

fn review_prompt(question: &str, correct_solution: &str, student_attempt: &str) -> String {
    format!(
        "You are a strict but helpful math teacher.\n\
         Question: {}\n\
         Correct Solution: {}\n\
         Student Attempt: {}\n\n\
         Analyze the student's work. Find the specific line where they made a mistake (if any).\n\
         Output JSON:\n\
         {{\n\
           \"correct\": boolean,\n\
           \"feedback\": \"Encouraging feedback pointing out the logic error\",\n\
           \"correction\": \"The corrected math for that specific step using LaTeX ($...$)\"\n\
         }}",
        question, correct_solution, student_attempt
    )
}
