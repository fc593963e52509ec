//! Core library for the Cantilena singing synthesis pipeline.
//!
//! The crate turns a sung score (notes, rests, syllabified lyrics) plus the
//! phonemizer's transcription of the lyric text into a time- and
//! pitch-aligned phonetic stream for a diphone synthesizer. Each module owns
//! one stage: `score` resolves the document into events, `segment` partitions
//! them into chunks and assembles the phonemizer input text, `phoneme`
//! tokenizes the phonemizer output into syllable groups, `align` fits
//! phoneme timing and pitch onto the notes, and `pho` serializes the result.
//! The external phonemizer and synthesizer are reached through the narrow
//! ports in `pipeline`, so the whole chain can run against fakes in tests.

pub mod align;
pub mod config;
pub mod error;
pub mod pho;
pub mod phoneme;
pub mod pipeline;
pub mod score;
pub mod segment;

pub use align::{fit_durations, render_chunks, split_fragments, AlignedFragment};
pub use config::{PipelineConfig, DEFAULT_BPM};
pub use error::{CantilenaError, Result};
pub use pho::PhoWriter;
pub use phoneme::{ContourPoint, PhonemeToken, SyllableGroup};
pub use pipeline::{Phonemizer, Pipeline, Synthesizer};
pub use score::{Event, Note, Score, Syllabic, Syllable};
pub use segment::{segment, Chunk};
