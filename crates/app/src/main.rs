use std::path::PathBuf;

use cantilena_core::{Pipeline, PipelineConfig, Score};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod espeak;
mod mbrola;
mod voice;

fn main() -> cantilena_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    // Voice resolution is the only configuration step; fail before any
    // processing starts.
    let voice_path = voice::resolve(&cli.voice)?;
    tracing::info!(voice = %cli.voice, path = %voice_path.display(), "resolved voice");

    let score = Score::from_json(&std::fs::read_to_string(&cli.score)?)?;
    tracing::info!(score = %cli.score.display(), events = score.events.len(), "loaded score");

    let mut config = PipelineConfig::default();
    if let Some(bpm) = cli.bpm {
        config.fallback_bpm = bpm;
    }

    let pipeline = Pipeline::new(
        espeak::EspeakPhonemizer::new(&cli.voice),
        mbrola::MbrolaSynthesizer::new(voice_path, cli.output.clone()),
        config,
    );

    let pho = pipeline.run(&score)?;
    tracing::info!(output = %cli.output.display(), "synthesis complete");

    if cli.pho {
        println!("{pho}");
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Sings a score through espeak and mbrola", long_about = None)]
struct Cli {
    /// MBROLA voice name (e.g. en1).
    voice: String,
    /// Path to the score (JSON).
    score: PathBuf,
    /// Print the intermediate pho stream to stdout.
    #[arg(long)]
    pho: bool,
    /// Where to write the rendered audio.
    #[arg(short, long, default_value = "test.wav")]
    output: PathBuf,
    /// Fallback tempo for scores that carry none.
    #[arg(long)]
    bpm: Option<f64>,
}
