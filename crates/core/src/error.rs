/// Result alias that carries the custom [`CantilenaError`] type.
pub type Result<T> = std::result::Result<T, CantilenaError>;

/// Common error type for the core crate.
///
/// Tempo fallback and unknown-symbol classification are deliberately *not*
/// represented here: both are silent recoveries (default BPM, consonant by
/// default) rather than error paths.
#[derive(Debug, thiserror::Error)]
pub enum CantilenaError {
    /// The requested voice was not found in any candidate location.
    #[error("voice `{0}` not found in any known voice directory")]
    VoiceNotFound(String),
    /// The voice keyword contained a path-traversal sequence.
    #[error("voice keyword `{0}` must not contain `..` or a path separator")]
    InvalidVoiceKeyword(String),
    /// The score document could not be deserialized.
    #[error("failed to parse score: {0}")]
    ScoreJson(#[from] serde_json::Error),
    /// The score document deserialized but is not playable.
    #[error("invalid score: {0}")]
    InvalidScore(String),
    /// A line of phonemizer output did not match the expected shape.
    #[error("malformed phonemizer line `{line}`: {reason}")]
    PhonemeLine { line: String, reason: String },
    /// The phonemizer produced fewer syllable groups than the score needs.
    #[error("phonemizer produced {available} syllable group(s) but the score needs {required}")]
    PhonemeShortfall { required: usize, available: usize },
    /// An external process exited abnormally.
    #[error("{command} exited with {status}")]
    ProcessFailed {
        command: String,
        status: std::process::ExitStatus,
    },
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
