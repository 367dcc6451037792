//! Gemini solver provider.
//!
//! One HTTP surface: `generateContent`. Image questions go out as a single
//! user turn carrying the system prompt, the context JSON, and the inline
//! image; chat turns go out as role-tagged history under a system
//! instruction. The raw response text is returned untouched so decoding and
//! validation stay in the solution crate.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use tutorforge_core::{ChatMessage, ChatRole, SolveRequest, SolverProvider, TutorError};

use crate::prompt::PromptBuilder;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Google Gemini provider.
pub struct GeminiSolver {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiSolver {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// The key travels in the query string, so this URL must never be logged.
    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    async fn generate(&self, body: &GenerateRequest) -> Result<String> {
        let response = self
            .client
            .post(self.endpoint())
            .json(body)
            .send()
            .await
            .context("Gemini HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(TutorError::ProviderError {
                provider: self.name().to_string(),
                message: format!("{}: {}", status, error_body),
            }
            .into());
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .context("Failed to parse Gemini response envelope")?;

        match first_text(parsed) {
            Some(text) => Ok(text),
            None => Err(TutorError::EmptyResponse.into()),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

impl Content {
    fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts,
        }
    }

    fn bare(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Deserialize, Default)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

fn first_text(response: GenerateResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content.parts.into_iter().next())
        .and_then(|part| part.text)
        .filter(|text| !text.is_empty())
}

#[async_trait]
impl SolverProvider for GeminiSolver {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn solve(&self, request: &SolveRequest) -> Result<String> {
        let context = PromptBuilder::solve_context(
            request.mode,
            &request.user_language,
            request.instruction.as_deref(),
        );
        let body = GenerateRequest {
            contents: vec![Content::user(vec![
                Part::text(PromptBuilder::solver_system()),
                Part::text(format!("Context: {}", context)),
                Part::inline_data(&request.mime_type, &request.image_base64),
            ])],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                temperature: Some(0.2),
            }),
        };

        info!(
            "[Solver] Solving {} question via {} ({} mode)",
            request.mime_type, self.model, request.mode
        );
        self.generate(&body).await
    }

    async fn respond(&self, system: &str, history: &[ChatMessage]) -> Result<String> {
        // System-role turns ride in the dedicated instruction slot, never in
        // the contents list.
        let contents: Vec<Content> = history
            .iter()
            .filter(|message| message.role != ChatRole::System)
            .map(|message| Content {
                role: Some(
                    match message.role {
                        ChatRole::Model => "model",
                        _ => "user",
                    }
                    .to_string(),
                ),
                parts: vec![Part::text(&message.content)],
            })
            .collect();

        let body = GenerateRequest {
            contents,
            system_instruction: Some(Content::bare(system)),
            generation_config: None,
        };

        debug!("[Solver] Sending chat turn ({} messages)", history.len());
        self.generate(&body).await
    }
}
