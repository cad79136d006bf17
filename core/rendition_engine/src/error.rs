/// Result alias carrying [`EngineError`].
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors surfaced to the control context.
///
/// The render path never produces these; anomalies there are absorbed
/// as silence or ignored requests.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("rendition store is already initialized")]
    AlreadyInitialized,
    /// Malformed rendition data. Nothing from the offending set is kept.
    #[error("invalid rendition input: {0}")]
    InvalidInput(String),
    #[error("rendition index {index} out of range (have {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("engine command queue is full")]
    CommandQueueFull,
    #[error("failed to decode WAV: {0}")]
    Wav(#[from] hound::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    pub fn invalid<T: Into<String>>(msg: T) -> Self {
        Self::InvalidInput(msg.into())
    }
}
