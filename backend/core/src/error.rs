use thiserror::Error;

/// Top-level error type for the TutorForge runtime.
#[derive(Debug, Error)]
pub enum TutorError {
    #[error("solver provider error ({provider}): {message}")]
    ProviderError { provider: String, message: String },

    #[error("model response carried no usable content")]
    EmptyResponse,

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("storage error: {0}")]
    StorageError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
