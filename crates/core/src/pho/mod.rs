use std::fmt::Write as _;

use crate::align::AlignedFragment;
use crate::score::Note;

/// Incremental writer for the pho line format consumed by the synthesizer.
///
/// Line grammar:
/// - `_ <duration_ms>` — silence.
/// - `A <duration_ms> 0 <freq_Hz> 100 <freq_Hz>` — flat-pitch note.
/// - `; <total_duration_ms> <syllable text>` — sung-chunk header.
/// - `<symbol> <duration_ms> [<time%> <freq_Hz>]*` — phonetic fragment.
///
/// Numbers use Rust's shortest round-trip float formatting, so whole values
/// print without a decimal point.
#[derive(Debug, Default)]
pub struct PhoWriter {
    lines: Vec<String>,
}

impl PhoWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits a silence line for a rest.
    pub fn rest(&mut self, duration_ms: f64) {
        self.lines.push(format!("_ {duration_ms}"));
    }

    /// Emits a constant-pitch glide spanning a whole unsung note.
    pub fn flat_note(&mut self, note: &Note) {
        self.lines.push(format!(
            "A {} 0 {} 100 {}",
            note.duration_ms, note.frequency_hz, note.frequency_hz
        ));
    }

    /// Emits the header line opening a sung chunk.
    pub fn chunk_header(&mut self, total_duration_ms: f64, syllable_text: &str) {
        self.lines
            .push(format!("; {total_duration_ms} {syllable_text}"));
    }

    /// Emits one aligned fragment with its flattened contour pairs.
    pub fn fragment(&mut self, fragment: &AlignedFragment) {
        let mut line = format!("{} {}", fragment.symbol, fragment.duration_ms);
        for point in &fragment.contour {
            let _ = write!(line, " {} {}", point.time, point.frequency);
        }
        self.lines.push(line);
    }

    /// Lines emitted so far, in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consumes the writer and returns the complete pho stream.
    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}
