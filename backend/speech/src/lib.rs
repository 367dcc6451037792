pub mod engine;
pub mod gemini;
pub mod script;

pub use engine::{pcm_to_wav, AudioFormat, SpeechProvider, SpeechRequest, PCM_SAMPLE_RATE};
pub use gemini::{GeminiSpeech, DEFAULT_SPEECH_MODEL, DEFAULT_VOICE};
pub use script::explanation_script;
