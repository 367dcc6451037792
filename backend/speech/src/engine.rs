/// Speech provider trait and request types.
use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// Sample rate of the PCM audio Gemini speech models return.
pub const PCM_SAMPLE_RATE: u32 = 24_000;

/// Audio format for synthesized speech.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AudioFormat {
    /// Raw 16-bit little-endian mono PCM at 24 kHz.
    #[default]
    Pcm24k,
    Mp3,
    /// PCM wrapped in a RIFF/WAVE header.
    Wav,
}

impl AudioFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pcm24k => "audio/pcm",
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
        }
    }
}

/// A speech synthesis request.
#[derive(Debug, Clone, Default)]
pub struct SpeechRequest {
    pub text: String,
    pub voice: Option<String>,
    pub format: AudioFormat,
}

/// Returns raw audio bytes in the requested format.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    async fn synthesize(&self, request: SpeechRequest) -> Result<Bytes>;
}

/// Wraps raw 16-bit mono PCM in a minimal RIFF/WAVE header so common
/// players can open it.
pub fn pcm_to_wav(pcm: &[u8], sample_rate: u32) -> Vec<u8> {
    let channels: u16 = 1;
    let bits_per_sample: u16 = 16;
    let block_align = channels * bits_per_sample / 8;
    let byte_rate = sample_rate * block_align as u32;
    let data_len = pcm.len() as u32;

    let mut wav = Vec::with_capacity(44 + pcm.len());
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&channels.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&bits_per_sample.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    wav.extend_from_slice(pcm);
    wav
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_types() {
        assert_eq!(AudioFormat::Pcm24k.mime_type(), "audio/pcm");
        assert_eq!(AudioFormat::Wav.mime_type(), "audio/wav");
        assert_eq!(AudioFormat::Mp3.mime_type(), "audio/mpeg");
    }

    #[test]
    fn test_wav_header_layout() {
        let pcm = [0u8, 1, 2, 3];
        let wav = pcm_to_wav(&pcm, PCM_SAMPLE_RATE);

        assert_eq!(wav.len(), 44 + pcm.len());
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[24..28], &PCM_SAMPLE_RATE.to_le_bytes());
        assert_eq!(&wav[40..44], &(pcm.len() as u32).to_le_bytes());
        assert_eq!(&wav[44..], &pcm);
    }

    #[test]
    fn test_default_format_is_pcm() {
        assert_eq!(SpeechRequest::default().format, AudioFormat::Pcm24k);
    }
}
