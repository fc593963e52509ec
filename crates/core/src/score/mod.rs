use serde::{Deserialize, Serialize};

use crate::{CantilenaError, Result};

/// Role of a syllable within its word. Controls the word-boundary spacing
/// inserted into the text fed to the phonemizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Syllabic {
    Begin,
    Middle,
    End,
    Single,
}

/// One lyric syllable attached to a note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Syllable {
    pub text: String,
    pub syllabic: Syllabic,
}

/// Raw score event as it appears in the JSON document. Durations come either
/// as explicit milliseconds or as a quarter-note length resolved against the
/// score tempo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScoreEvent {
    Note {
        frequency_hz: f64,
        #[serde(default)]
        duration_ms: Option<f64>,
        #[serde(default)]
        quarter_length: Option<f64>,
        #[serde(default)]
        lyric: Option<Syllable>,
    },
    Rest {
        #[serde(default)]
        duration_ms: Option<f64>,
        #[serde(default)]
        quarter_length: Option<f64>,
    },
    /// Non-playable decorations (markers, directions, ...) are tolerated in
    /// the document and skipped during resolution.
    #[serde(other)]
    Other,
}

/// A single-part score: an ordered event stream plus an optional tempo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Score {
    #[serde(default)]
    pub tempo_bpm: Option<f64>,
    pub events: Vec<ScoreEvent>,
}

impl Score {
    /// Deserializes a score from its JSON document form.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Resolves the raw events into playable [`Event`]s with concrete
    /// millisecond durations. A score without a tempo falls back silently to
    /// `fallback_bpm` for quarter-length durations.
    pub fn resolve_events(&self, fallback_bpm: f64) -> Result<Vec<Event>> {
        let bpm = self.tempo_bpm.unwrap_or(fallback_bpm);
        let mut resolved = Vec::with_capacity(self.events.len());
        for event in &self.events {
            match event {
                ScoreEvent::Note {
                    frequency_hz,
                    duration_ms,
                    quarter_length,
                    lyric,
                } => {
                    if !(*frequency_hz > 0.0) {
                        return Err(CantilenaError::InvalidScore(format!(
                            "note frequency must be positive, got {frequency_hz}"
                        )));
                    }
                    resolved.push(Event::Note {
                        note: Note {
                            duration_ms: resolve_duration(*duration_ms, *quarter_length, bpm)?,
                            frequency_hz: *frequency_hz,
                        },
                        syllable: lyric.clone(),
                    });
                }
                ScoreEvent::Rest {
                    duration_ms,
                    quarter_length,
                } => {
                    resolved.push(Event::Rest {
                        duration_ms: resolve_duration(*duration_ms, *quarter_length, bpm)?,
                    });
                }
                ScoreEvent::Other => {}
            }
        }
        Ok(resolved)
    }
}

fn resolve_duration(
    duration_ms: Option<f64>,
    quarter_length: Option<f64>,
    bpm: f64,
) -> Result<f64> {
    match (duration_ms, quarter_length) {
        (Some(ms), _) => Ok(ms),
        (None, Some(ql)) => Ok(ql * 60_000.0 / bpm),
        (None, None) => Err(CantilenaError::InvalidScore(
            "event carries neither duration_ms nor quarter_length".to_string(),
        )),
    }
}

/// A playable note with its duration already resolved to milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub duration_ms: f64,
    pub frequency_hz: f64,
}

/// Resolved score event: a note (possibly carrying a syllable) or a rest.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Note {
        note: Note,
        syllable: Option<Syllable>,
    },
    Rest {
        duration_ms: f64,
    },
}

impl Event {
    /// Duration in milliseconds, regardless of variant.
    pub fn duration_ms(&self) -> f64 {
        match self {
            Event::Note { note, .. } => note.duration_ms,
            Event::Rest { duration_ms } => *duration_ms,
        }
    }
}
