use serde::{Deserialize, Serialize};

/// Tempo assumed when neither the score nor the caller provides one.
pub const DEFAULT_BPM: f64 = 120.0;

/// Tuning knobs threaded through the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Tempo used to resolve `quarter_length` durations when the score
    /// carries no tempo of its own.
    pub fallback_bpm: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fallback_bpm: DEFAULT_BPM,
        }
    }
}
