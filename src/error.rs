use crate::config::ConfigError;
use crate::transcript::TranscriptError;

/// Crate-level error for the outer surfaces (config, transcript input, CLI).
///
/// The annotation core itself is infallible and never produces one.
#[derive(Debug, thiserror::Error)]
pub enum CallviewError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Transcript(#[from] TranscriptError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Process exit code for an error reaching `main`.
#[must_use]
pub fn exit_code(err: &CallviewError) -> i32 {
    match err {
        CallviewError::Config(_) => 2,
        CallviewError::Transcript(_) | CallviewError::Io(_) => 1,
    }
}
