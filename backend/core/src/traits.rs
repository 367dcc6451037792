use anyhow::Result;
use async_trait::async_trait;

use crate::message::ChatMessage;
use crate::types::SolverMode;

/// A single image-question submission to the solver.
#[derive(Debug, Clone)]
pub struct SolveRequest {
    /// MIME type of the captured image (e.g. "image/png").
    pub mime_type: String,
    /// Base64-encoded image bytes.
    pub image_base64: String,
    pub mode: SolverMode,
    /// Language the answer should be written in (e.g. "English").
    pub user_language: String,
    /// Optional free-form instruction from the student.
    pub instruction: Option<String>,
}

/// Trait for model providers that solve questions and hold tutoring turns.
///
/// `solve` returns the RAW model text; decoding and validation live in the
/// solution crate so transport and parsing stay independently testable.
#[async_trait]
pub trait SolverProvider: Send + Sync {
    /// Provider name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Submit an image question and return the raw response text.
    async fn solve(&self, request: &SolveRequest) -> Result<String>;

    /// One conversational turn: system instruction plus prior history,
    /// newest message last. Returns the model's reply text.
    async fn respond(&self, system: &str, history: &[ChatMessage]) -> Result<String>;
}
