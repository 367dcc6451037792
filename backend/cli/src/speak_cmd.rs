//! `speak` command: narrate a solution to a WAV file.

use std::path::Path;

use anyhow::{Context, Result};
use tutorforge_speech::{explanation_script, AudioFormat, SpeechProvider, SpeechRequest};

use crate::terminal;

pub async fn run(provider: &dyn SpeechProvider, solution: &Path, out: &Path) -> Result<()> {
    let document = crate::read_document(solution).await?;
    let script = explanation_script(&document);
    let audio = provider
        .synthesize(SpeechRequest {
            text: script,
            voice: None,
            format: AudioFormat::Wav,
        })
        .await?;
    tokio::fs::write(out, &audio)
        .await
        .with_context(|| format!("Failed to write {}", out.display()))?;
    terminal::note_success(&format!("Saved narration to {}", out.display()));
    Ok(())
}
