use crate::phoneme::PhonemeToken;
use crate::score::{Event, Note, Syllabic, Syllable};

/// The unit of alignment: one rest, one bare note, or a melisma group of
/// notes sharing a single syllable. The note list of a `Bare` or `Sung`
/// chunk is never empty.
#[derive(Debug, Clone, PartialEq)]
pub enum Chunk {
    Rest {
        duration_ms: f64,
    },
    /// Notes with no lyric of their own that do not continue a melisma.
    Bare {
        notes: Vec<Note>,
    },
    /// Notes sung on one syllable. `phonemes` starts empty and is filled in
    /// by [`crate::phoneme::distribute`].
    Sung {
        notes: Vec<Note>,
        syllable: Syllable,
        phonemes: Vec<PhonemeToken>,
    },
}

impl Chunk {
    /// Total duration of the chunk in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        match self {
            Chunk::Rest { duration_ms } => *duration_ms,
            Chunk::Bare { notes } | Chunk::Sung { notes, .. } => {
                notes.iter().map(|note| note.duration_ms).sum()
            }
        }
    }
}

/// Partitions the resolved event stream into chunks and assembles the
/// word-spaced lyric text for the phonemizer.
///
/// A rest always starts its own chunk, as does a note carrying a syllable. A
/// note without a syllable extends the previous chunk only when that chunk is
/// sung (melisma continuation); otherwise it becomes a bare chunk of its own.
pub fn segment(events: Vec<Event>) -> (Vec<Chunk>, String) {
    let mut chunks: Vec<Chunk> = Vec::new();
    let mut text = String::new();

    for event in events {
        match event {
            Event::Rest { duration_ms } => chunks.push(Chunk::Rest { duration_ms }),
            Event::Note {
                note,
                syllable: Some(syllable),
            } => {
                push_spaced(&mut text, &syllable);
                chunks.push(Chunk::Sung {
                    notes: vec![note],
                    syllable,
                    phonemes: Vec::new(),
                });
            }
            Event::Note {
                note,
                syllable: None,
            } => {
                if let Some(Chunk::Sung { notes, .. }) = chunks.last_mut() {
                    notes.push(note);
                } else {
                    chunks.push(Chunk::Bare { notes: vec![note] });
                }
            }
        }
    }

    (chunks, text)
}

/// Appends the syllable text with the word-boundary spacing implied by its
/// syllabic position: a leading space opens a word, a trailing space closes
/// one, and word-internal syllables join bare.
fn push_spaced(text: &mut String, syllable: &Syllable) {
    if matches!(syllable.syllabic, Syllabic::Begin | Syllabic::Single) {
        text.push(' ');
    }
    text.push_str(&syllable.text);
    if matches!(syllable.syllabic, Syllabic::End | Syllabic::Single) {
        text.push(' ');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(duration_ms: f64) -> Note {
        Note {
            duration_ms,
            frequency_hz: 440.0,
        }
    }

    fn sung(duration_ms: f64, text: &str, syllabic: Syllabic) -> Event {
        Event::Note {
            note: note(duration_ms),
            syllable: Some(Syllable {
                text: text.to_string(),
                syllabic,
            }),
        }
    }

    fn bare(duration_ms: f64) -> Event {
        Event::Note {
            note: note(duration_ms),
            syllable: None,
        }
    }

    #[test]
    fn melisma_notes_extend_the_sung_chunk() {
        let (chunks, _) = segment(vec![
            sung(500.0, "la", Syllabic::Single),
            bare(250.0),
            bare(250.0),
        ]);

        assert_eq!(chunks.len(), 1);
        match &chunks[0] {
            Chunk::Sung { notes, .. } => assert_eq!(notes.len(), 3),
            other => panic!("expected a sung chunk, got {other:?}"),
        }
        assert_eq!(chunks[0].duration_ms(), 1000.0);
    }

    #[test]
    fn bare_notes_without_a_preceding_lyric_stand_alone() {
        let (chunks, text) = segment(vec![bare(100.0), bare(200.0)]);

        assert_eq!(
            chunks,
            vec![
                Chunk::Bare {
                    notes: vec![note(100.0)]
                },
                Chunk::Bare {
                    notes: vec![note(200.0)]
                },
            ]
        );
        assert!(text.is_empty());
    }

    #[test]
    fn rest_interrupts_a_melisma() {
        let (chunks, _) = segment(vec![
            sung(500.0, "la", Syllabic::Single),
            Event::Rest { duration_ms: 300.0 },
            bare(250.0),
        ]);

        assert_eq!(chunks.len(), 3);
        assert!(matches!(chunks[1], Chunk::Rest { duration_ms } if duration_ms == 300.0));
        assert!(matches!(&chunks[2], Chunk::Bare { notes } if notes.len() == 1));
    }

    #[test]
    fn syllabic_positions_control_word_spacing() {
        let (_, text) = segment(vec![
            sung(1.0, "hel", Syllabic::Begin),
            sung(1.0, "lo", Syllabic::End),
            sung(1.0, "to", Syllabic::Single),
            sung(1.0, "eve", Syllabic::Begin),
            sung(1.0, "ry", Syllabic::Middle),
            sung(1.0, "one", Syllabic::End),
        ]);

        assert_eq!(text, " hello  to  everyone ");
    }
}
