//! Socratic follow-up chat over a solved question.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tutorforge_core::{ChatMessage, SolverProvider};
use tutorforge_solution::SolutionDocument;

/// Most recent turns sent to the provider per request. Older turns stay in
/// the session but leave the model's context.
const HISTORY_WINDOW: usize = 20;

/// Opening line shown before the first student question.
pub const GREETING: &str =
    "Hi! I'm your AI Tutor. Ask me anything about this problem or if you need clarification on a step!";

/// A follow-up conversation anchored to one decoded solution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: Uuid,
    system: String,
    history: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn for_solution(document: &SolutionDocument) -> Self {
        Self {
            id: Uuid::new_v4(),
            system: socratic_instruction(document),
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// One tutoring turn: record the student's question, send the recent
    /// window under the Socratic instruction, record and return the reply.
    pub async fn ask(
        &mut self,
        provider: &dyn SolverProvider,
        question: impl Into<String>,
    ) -> Result<String> {
        self.history.push(ChatMessage::user(question));
        let reply = provider
            .respond(&self.system, recent_window(&self.history))
            .await?;
        self.history.push(ChatMessage::model(reply.clone()));
        Ok(reply)
    }
}

fn recent_window(history: &[ChatMessage]) -> &[ChatMessage] {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    &history[start..]
}

/// The tutor must guide rather than answer, so the instruction carries the
/// solved problem as context but forbids just handing out results.
fn socratic_instruction(document: &SolutionDocument) -> String {
    let context = serde_json::json!({
        "question": document.question_understanding.clean_question,
        "solution": document.short_answer,
        "level": document.difficulty.level,
    });
    format!(
        "You are a patient, Socratic AI Tutor.\n\
         The user is asking about a specific problem they just solved.\n\
         Context: {}\n\
         RULES:\n\
         1. Use Markdown for all math (wrap in $ or $$).\n\
         2. Do not just give answers; guide the student.",
        context
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSolver;
    use crate::testutil::solved_document;
    use tutorforge_core::ChatRole;

    #[test]
    fn test_instruction_embeds_problem_context() {
        let session = ChatSession::for_solution(&solved_document());
        assert!(session.system.contains("Socratic"));
        assert!(session.system.contains("Solve $x^2 = 9$."));
        assert!(session.system.contains("\"level\":\"easy\""));
    }

    #[tokio::test]
    async fn test_ask_records_both_turns() {
        let provider = MockSolver::new().with_response("What happens if you take the root?");
        let mut session = ChatSession::for_solution(&solved_document());

        let reply = session.ask(&provider, "I am stuck on step 1").await.unwrap();
        assert_eq!(reply, "What happens if you take the root?");
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[0].role, ChatRole::User);
        assert_eq!(session.history()[1].role, ChatRole::Model);
    }

    #[test]
    fn test_window_keeps_only_recent_messages() {
        let history: Vec<ChatMessage> = (0..25)
            .map(|i| ChatMessage::user(format!("question {}", i)))
            .collect();
        let window = recent_window(&history);
        assert_eq!(window.len(), HISTORY_WINDOW);
        assert_eq!(window[0].content, "question 5");
        assert_eq!(window[window.len() - 1].content, "question 24");
    }
}
