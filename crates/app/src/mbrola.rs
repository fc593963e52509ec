//! mbrola adapter for the synthesizer port.

use std::io::Write as _;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use cantilena_core::{CantilenaError, Result, Synthesizer};

/// Feeds the complete pho stream to `mbrola` on stdin and lets it render the
/// audio to the configured output path.
#[derive(Debug)]
pub struct MbrolaSynthesizer {
    voice_path: PathBuf,
    output_path: PathBuf,
}

impl MbrolaSynthesizer {
    pub fn new(voice_path: PathBuf, output_path: PathBuf) -> Self {
        Self {
            voice_path,
            output_path,
        }
    }
}

impl Synthesizer for MbrolaSynthesizer {
    fn synthesize(&self, pho: &str) -> Result<()> {
        let mut child = Command::new("mbrola")
            .arg(&self.voice_path)
            .arg("-")
            .arg(&self.output_path)
            .stdin(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(pho.as_bytes())?;
            // Dropping stdin closes the pipe so mbrola sees end of input.
        }

        let status = child.wait()?;
        if !status.success() {
            return Err(CantilenaError::ProcessFailed {
                command: "mbrola".to_string(),
                status,
            });
        }
        Ok(())
    }
}
