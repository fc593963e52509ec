//! espeak adapter for the phonemizer port.

use std::process::Command;

use cantilena_core::{CantilenaError, Phonemizer, Result};

/// Invokes `espeak` in quiet pho mode against the matching MBROLA voice and
/// buffers its full output before the tokenizer sees it.
#[derive(Debug)]
pub struct EspeakPhonemizer {
    voice_arg: String,
}

impl EspeakPhonemizer {
    pub fn new(voice: &str) -> Self {
        Self {
            voice_arg: format!("mb-{voice}"),
        }
    }
}

impl Phonemizer for EspeakPhonemizer {
    fn phonemize(&self, text: &str) -> Result<String> {
        let output = Command::new("espeak")
            .args(["-v", &self.voice_arg, "-q", "--pho", text])
            .output()?;
        if !output.status.success() {
            return Err(CantilenaError::ProcessFailed {
                command: "espeak".to_string(),
                status: output.status,
            });
        }
        tracing::debug!(bytes = output.stdout.len(), "captured phonemizer output");
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
