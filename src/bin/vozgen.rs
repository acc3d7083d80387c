//! vozgen CLI — batch-convert a dialogue script to MP3 files.
//!
//! Usage:
//!   vozgen --api-key sk_…
//!   vozgen --api-key sk_… --script demos/dialogo.json --out-dir audios
//!
//! The API key may also come from the ELEVENLABS_API_KEY environment
//! variable. Without --script the bundled sample dialogue is used.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use vozgen::{DialogueScript, DialogueSynthesizer, TtsClient, VoiceSettings, DEFAULT_OUT_DIR,
    ELEVENLABS_API_BASE};

#[derive(Parser, Debug)]
#[command(name = "vozgen", version, about = "Batch dialogue-to-speech via the ElevenLabs API")]
struct Cli {
    /// JSON dialogue script (array of {speaker, voice_id, text}).
    /// Defaults to the bundled sample dialogue.
    #[arg(long)]
    script: Option<PathBuf>,

    /// ElevenLabs API key. Falls back to $ELEVENLABS_API_KEY.
    #[arg(long)]
    api_key: Option<String>,

    /// Directory for the generated MP3 files.
    #[arg(long, default_value = DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    /// Endpoint template; the voice ID is appended verbatim.
    #[arg(long, default_value = ELEVENLABS_API_BASE)]
    base_url: String,

    /// Voice stability setting.
    #[arg(long, default_value_t = 0.5)]
    stability: f32,

    /// Voice similarity-boost setting.
    #[arg(long, default_value_t = 0.75)]
    similarity_boost: f32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Credential: flag first, then environment ─────────────────────────────
    let api_key = match cli.api_key {
        Some(key) => key,
        None => match std::env::var("ELEVENLABS_API_KEY") {
            Ok(key) => key,
            Err(_) => bail!("No API key: pass --api-key or set ELEVENLABS_API_KEY"),
        },
    };

    // ── Load the script ──────────────────────────────────────────────────────
    let script = match &cli.script {
        Some(path) => DialogueScript::from_json_file(path)
            .with_context(|| format!("Cannot load script: {}", path.display()))?,
        None => DialogueScript::sample(),
    };
    if script.is_empty() {
        bail!("Dialogue script is empty");
    }

    println!("Script   : {} utterances", script.len());
    println!("Endpoint : {}", cli.base_url);
    println!("Output   : {}", cli.out_dir.display());
    println!();

    // ── Run the batch ────────────────────────────────────────────────────────
    let client = TtsClient::with_base_url(api_key, cli.base_url).voice_settings(VoiceSettings {
        stability: cli.stability,
        similarity_boost: cli.similarity_boost,
    });
    let synth = DialogueSynthesizer::new(client, cli.out_dir);

    let report = synth.run(&script)?;

    // Per-utterance failures are already reported line by line; the batch
    // itself still completed, so exit 0 either way.
    println!();
    println!("Done: {} saved, {} failed", report.saved(), report.failed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["vozgen"]);
        assert!(cli.script.is_none());
        assert_eq!(cli.out_dir, PathBuf::from("audios"));
        assert_eq!(cli.base_url, ELEVENLABS_API_BASE);
        assert_eq!(cli.stability, 0.5);
        assert_eq!(cli.similarity_boost, 0.75);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "vozgen",
            "--script", "demos/dialogo.json",
            "--api-key", "k",
            "--out-dir", "/tmp/voz",
            "--stability", "0.3",
        ]);
        assert_eq!(cli.script, Some(PathBuf::from("demos/dialogo.json")));
        assert_eq!(cli.api_key.as_deref(), Some("k"));
        assert_eq!(cli.out_dir, PathBuf::from("/tmp/voz"));
        assert_eq!(cli.stability, 0.3);
    }
}
