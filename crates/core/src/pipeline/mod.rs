use crate::config::PipelineConfig;
use crate::pho::PhoWriter;
use crate::score::Score;
use crate::{align, phoneme, segment, Result};

/// Port to the external text-to-phoneme process. Given the assembled,
/// word-spaced lyric text, returns its raw line-oriented output.
pub trait Phonemizer {
    fn phonemize(&self, text: &str) -> Result<String>;
}

/// Port to the external audio synthesizer. Consumes the complete pho stream;
/// the rendered audio goes wherever the implementation is configured to put
/// it.
pub trait Synthesizer {
    fn synthesize(&self, pho: &str) -> Result<()>;
}

/// Strictly sequential batch pipeline: segmentation, one blocking phonemizer
/// round trip, alignment, one blocking synthesizer round trip. Any failure
/// aborts the run; no partial output is emitted.
#[derive(Debug)]
pub struct Pipeline<P, S> {
    phonemizer: P,
    synthesizer: S,
    config: PipelineConfig,
}

impl<P: Phonemizer, S: Synthesizer> Pipeline<P, S> {
    pub fn new(phonemizer: P, synthesizer: S, config: PipelineConfig) -> Self {
        Self {
            phonemizer,
            synthesizer,
            config,
        }
    }

    /// Runs the full pipeline over a score and returns the pho stream that
    /// was handed to the synthesizer.
    pub fn run(&self, score: &Score) -> Result<String> {
        let events = score.resolve_events(self.config.fallback_bpm)?;
        let (mut chunks, text) = segment::segment(events);

        let raw = self.phonemizer.phonemize(&text)?;
        let groups = phoneme::parse_groups(&raw)?;
        phoneme::distribute(&mut chunks, groups)?;

        let mut writer = PhoWriter::new();
        align::render_chunks(&chunks, &mut writer);
        let pho = writer.finish();

        self.synthesizer.synthesize(&pho)?;
        Ok(pho)
    }
}
