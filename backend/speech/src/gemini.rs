//! Gemini speech synthesis.
//!
//! Uses `generateContent` with the AUDIO response modality. The model
//! returns base64 16-bit mono PCM at 24 kHz; MP3 is not offered on this
//! endpoint, so requesting it is an error rather than a silent fallback.

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::{pcm_to_wav, AudioFormat, SpeechProvider, SpeechRequest, PCM_SAMPLE_RATE};

pub const DEFAULT_SPEECH_MODEL: &str = "gemini-2.5-flash-preview-tts";
pub const DEFAULT_VOICE: &str = "Kore";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub struct GeminiSpeech {
    client: Client,
    api_key: String,
    model: String,
    default_voice: String,
    base_url: String,
}

impl GeminiSpeech {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_SPEECH_MODEL.to_string(),
            default_voice: DEFAULT_VOICE.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.default_voice = voice.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Key in the query string; never log this URL.
    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechBody {
    contents: Vec<SpeechContent>,
    generation_config: SpeechGenerationConfig,
}

#[derive(Serialize)]
struct SpeechContent {
    parts: Vec<TextPart>,
}

#[derive(Serialize)]
struct TextPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechGenerationConfig {
    response_modalities: Vec<String>,
    speech_config: SpeechConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig {
    voice_config: VoiceConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig {
    prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig {
    voice_name: String,
}

#[derive(Deserialize)]
struct SpeechResponse {
    #[serde(default)]
    candidates: Vec<SpeechCandidate>,
}

#[derive(Deserialize)]
struct SpeechCandidate {
    #[serde(default)]
    content: SpeechCandidateContent,
}

#[derive(Deserialize, Default)]
struct SpeechCandidateContent {
    #[serde(default)]
    parts: Vec<SpeechCandidatePart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpeechCandidatePart {
    #[serde(default)]
    inline_data: Option<AudioPayload>,
}

#[derive(Deserialize)]
struct AudioPayload {
    data: String,
}

fn first_audio(response: SpeechResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| {
            candidate
                .content
                .parts
                .into_iter()
                .find_map(|part| part.inline_data)
        })
        .map(|payload| payload.data)
}

#[async_trait]
impl SpeechProvider for GeminiSpeech {
    async fn synthesize(&self, request: SpeechRequest) -> Result<Bytes> {
        if request.format == AudioFormat::Mp3 {
            anyhow::bail!("Gemini speech produces PCM only; request Pcm24k or Wav");
        }

        let voice = request
            .voice
            .unwrap_or_else(|| self.default_voice.clone());
        let body = SpeechBody {
            contents: vec![SpeechContent {
                parts: vec![TextPart { text: request.text }],
            }],
            generation_config: SpeechGenerationConfig {
                response_modalities: vec!["AUDIO".to_string()],
                speech_config: SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig { voice_name: voice },
                    },
                },
            },
        };

        info!("[Speech] Synthesizing with model={}", self.model);
        let response = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .context("Gemini speech HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini speech returned {}: {}", status, error_body);
        }

        let parsed: SpeechResponse = response
            .json()
            .await
            .context("Failed to parse Gemini speech response")?;
        let base64_audio = first_audio(parsed).context("Gemini response carried no audio")?;
        let pcm = STANDARD
            .decode(base64_audio)
            .context("Audio payload was not valid base64")?;

        Ok(match request.format {
            AudioFormat::Wav => Bytes::from(pcm_to_wav(&pcm, PCM_SAMPLE_RATE)),
            _ => Bytes::from(pcm),
        })
    }
}
