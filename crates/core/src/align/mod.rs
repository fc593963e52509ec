//! Alignment engine: stretches phoneme timing to fill each chunk's musical
//! duration, splits phonemes across note boundaries, and rescales pitch
//! contours onto the note frequencies.

use crate::pho::PhoWriter;
use crate::phoneme::{continuation_symbol, is_vowel, ContourPoint, PhonemeToken};
use crate::score::Note;
use crate::segment::Chunk;

/// The portion of one phoneme's timeline that falls within one note's
/// timeline; the atomic unit of emitted output. The contour frequencies are
/// in Hertz, already rescaled to the owning note.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedFragment {
    pub symbol: String,
    pub duration_ms: f64,
    pub contour: Vec<ContourPoint>,
}

/// Fits the natural phoneme durations onto the chunk's target duration.
///
/// When natural speech is shorter than the sung duration, the whole
/// shortfall goes to the last vowel and every other phoneme keeps its
/// natural length, preserving consonant identity. When it is longer, every
/// duration is scaled uniformly so relative proportions survive. The fit is
/// a no-op at the fixed point where the totals already match.
pub fn fit_durations(phonemes: &[PhonemeToken], target_ms: f64) -> Vec<f64> {
    let mut durations: Vec<f64> = phonemes.iter().map(|p| p.duration_ms).collect();
    let natural: f64 = durations.iter().sum();

    if natural <= target_ms {
        if let Some(last_vowel) = phonemes.iter().rposition(|p| is_vowel(&p.symbol)) {
            durations[last_vowel] += target_ms - natural;
        }
        // With no vowel to stretch the shortfall stays unassigned and the
        // chunk comes out shorter than its notes. Unresolved policy choice;
        // distributing it elsewhere would alter consonant identity.
    } else {
        for duration in &mut durations {
            *duration = *duration / natural * target_ms;
        }
    }
    durations
}

/// Splits the fitted phonemes across the chunk's notes.
///
/// Phonemes partition `[0, target)` at their fitted durations and notes
/// partition the same interval in temporal order; each overlap becomes one
/// fragment, clipped from either end. A fragment that starts after its
/// phoneme's own start is a sustained continuation and takes the
/// continuation symbol. Notes are scanned in increasing temporal order, so
/// scanning stops once a note begins past the phoneme's end.
pub fn split_fragments(
    phonemes: &[PhonemeToken],
    durations: &[f64],
    notes: &[Note],
) -> Vec<AlignedFragment> {
    let mut fragments = Vec::new();
    let mut pho_start = 0.0;

    for (token, &duration) in phonemes.iter().zip(durations) {
        let pho_end = pho_start + duration;
        let mut note_start = 0.0;
        for note in notes {
            let note_end = note_start + note.duration_ms;
            if note_start > pho_end {
                break;
            }
            if note_end < pho_start {
                note_start = note_end;
                continue;
            }

            let mut length = duration;
            let symbol = if note_start > pho_start {
                length -= note_start - pho_start;
                continuation_symbol(&token.symbol)
            } else {
                token.symbol.as_str()
            };
            if note_end < pho_end {
                length -= pho_end - note_end;
            }

            fragments.push(AlignedFragment {
                symbol: symbol.to_string(),
                duration_ms: length,
                contour: rescale_contour(&token.contour, note.frequency_hz),
            });
            note_start = note_end;
        }
        pho_start = pho_end;
    }
    fragments
}

/// Rescales a contour so its final point lands exactly on the note
/// frequency. The last point's frequency is the phonemizer's reference
/// pitch; time percentages describe intra-fragment shape and pass through
/// unchanged. Empty contours stay empty, and a non-positive reference pitch
/// leaves the contour as it is.
fn rescale_contour(contour: &[ContourPoint], note_hz: f64) -> Vec<ContourPoint> {
    let Some(reference) = contour.last() else {
        return Vec::new();
    };
    if reference.frequency <= 0.0 {
        return contour.to_vec();
    }
    contour
        .iter()
        .map(|point| ContourPoint {
            time: point.time,
            // Multiply before dividing so the reference point cancels
            // exactly and the final frequency lands on note_hz.
            frequency: point.frequency * note_hz / reference.frequency,
        })
        .collect()
}

/// Renders every chunk through the writer: a silence line per rest, a
/// flat-pitch line per bare note, and a header plus aligned fragments for
/// each sung chunk.
pub fn render_chunks(chunks: &[Chunk], writer: &mut PhoWriter) {
    for chunk in chunks {
        match chunk {
            Chunk::Rest { duration_ms } => writer.rest(*duration_ms),
            Chunk::Bare { notes } => {
                for note in notes {
                    writer.flat_note(note);
                }
            }
            Chunk::Sung {
                notes,
                syllable,
                phonemes,
            } => {
                let target_ms = chunk.duration_ms();
                writer.chunk_header(target_ms, &syllable.text);
                let durations = fit_durations(phonemes, target_ms);
                for fragment in split_fragments(phonemes, &durations, notes) {
                    writer.fragment(&fragment);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(symbol: &str, duration_ms: f64) -> PhonemeToken {
        PhonemeToken {
            symbol: symbol.to_string(),
            duration_ms,
            contour: Vec::new(),
        }
    }

    fn contoured(symbol: &str, duration_ms: f64, pairs: &[(f64, f64)]) -> PhonemeToken {
        PhonemeToken {
            symbol: symbol.to_string(),
            duration_ms,
            contour: pairs
                .iter()
                .map(|&(time, frequency)| ContourPoint { time, frequency })
                .collect(),
        }
    }

    fn note(duration_ms: f64, frequency_hz: f64) -> Note {
        Note {
            duration_ms,
            frequency_hz,
        }
    }

    #[test]
    fn shortfall_goes_entirely_to_the_last_vowel() {
        let phonemes = [token("l", 50.0), token("a", 100.0), token("t", 40.0)];
        let durations = fit_durations(&phonemes, 500.0);

        assert_eq!(durations, vec![50.0, 100.0 + 310.0, 40.0]);
        assert_eq!(durations.iter().sum::<f64>(), 500.0);
    }

    #[test]
    fn later_vowel_wins_over_earlier_ones() {
        let phonemes = [token("a", 100.0), token("l", 50.0), token("i", 100.0)];
        let durations = fit_durations(&phonemes, 400.0);

        assert_eq!(durations, vec![100.0, 50.0, 250.0]);
    }

    #[test]
    fn overlong_speech_is_scaled_uniformly() {
        let phonemes = [token("l", 300.0), token("a", 100.0)];
        let target = 200.0;
        let durations = fit_durations(&phonemes, target);

        let natural = 400.0;
        for (fitted, original) in durations.iter().zip([300.0, 100.0]) {
            assert!((fitted / target - original / natural).abs() < 1e-12);
        }
        assert!((durations.iter().sum::<f64>() - target).abs() < 1e-9);
    }

    #[test]
    fn all_consonant_shortfall_is_left_undistributed() {
        let phonemes = [token("s", 60.0), token("t", 40.0)];
        let durations = fit_durations(&phonemes, 500.0);

        assert_eq!(durations, vec![60.0, 40.0]);
    }

    #[test]
    fn fitting_is_idempotent_at_the_fixed_point() {
        let phonemes = [token("l", 50.0), token("a", 450.0)];
        let durations = fit_durations(&phonemes, 500.0);

        assert_eq!(durations, vec![50.0, 450.0]);
    }

    #[test]
    fn phoneme_spanning_two_notes_is_split_with_a_continuation_symbol() {
        let phonemes = [contoured("aI", 400.0, &[(0.0, 100.0)])];
        let durations = [400.0];
        let notes = [note(250.0, 200.0), note(150.0, 300.0)];

        let fragments = split_fragments(&phonemes, &durations, &notes);

        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].symbol, "aI");
        assert_eq!(fragments[0].duration_ms, 250.0);
        assert_eq!(fragments[1].symbol, "I");
        assert_eq!(fragments[1].duration_ms, 150.0);
        // Fragment durations always add back up to the phoneme duration.
        let total: f64 = fragments.iter().map(|f| f.duration_ms).sum();
        assert_eq!(total, 400.0);
    }

    #[test]
    fn fragment_durations_conserve_each_phoneme() {
        let phonemes = [token("l", 100.0), token("a", 500.0), token("m", 120.0)];
        let durations = [100.0, 500.0, 120.0];
        let notes = [note(240.0, 220.0), note(240.0, 247.0), note(240.0, 262.0)];

        let fragments = split_fragments(&phonemes, &durations, &notes);
        let total: f64 = fragments.iter().map(|f| f.duration_ms).sum();
        assert!((total - 720.0).abs() < 1e-9);
    }

    #[test]
    fn contour_final_point_lands_on_the_note_frequency() {
        let phonemes = [contoured("a:", 200.0, &[(0.0, 100.0), (50.0, 200.0)])];
        let durations = [200.0];
        let notes = [note(200.0, 220.0)];

        let fragments = split_fragments(&phonemes, &durations, &notes);

        assert_eq!(
            fragments[0].contour,
            vec![
                ContourPoint {
                    time: 0.0,
                    frequency: 110.0
                },
                ContourPoint {
                    time: 50.0,
                    frequency: 220.0
                },
            ]
        );
    }

    #[test]
    fn empty_contours_pass_through() {
        let phonemes = [token("l", 50.0)];
        let fragments = split_fragments(&phonemes, &[50.0], &[note(50.0, 220.0)]);

        assert!(fragments[0].contour.is_empty());
    }

    #[test]
    fn zero_reference_pitch_leaves_the_contour_unscaled() {
        let phonemes = [contoured("a", 50.0, &[(0.0, 0.0)])];
        let fragments = split_fragments(&phonemes, &[50.0], &[note(50.0, 220.0)]);

        assert_eq!(
            fragments[0].contour,
            vec![ContourPoint {
                time: 0.0,
                frequency: 0.0
            }]
        );
    }

    #[test]
    fn renders_a_sung_chunk_end_to_end() {
        let chunk = Chunk::Sung {
            notes: vec![note(500.0, 220.0)],
            syllable: crate::score::Syllable {
                text: "la".to_string(),
                syllabic: crate::score::Syllabic::Single,
            },
            phonemes: vec![
                token("l", 50.0),
                contoured("a:", 150.0, &[(0.0, 100.0), (50.0, 200.0)]),
            ],
        };

        let mut writer = PhoWriter::new();
        render_chunks(std::slice::from_ref(&chunk), &mut writer);

        assert_eq!(
            writer.lines(),
            ["; 500 la", "l 50", "a: 450 0 110 50 220"]
        );
    }
}
