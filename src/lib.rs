//! # vozgen
//!
//! Batch dialogue-to-speech generator backed by the ElevenLabs
//! text-to-speech HTTP API.
//!
//! Takes an ordered dialogue script (speaker, voice ID, text per line),
//! sends one synthesis request per line, and writes each successful
//! response verbatim as `{out_dir}/{index}_{speaker}.mp3`. Processing is
//! strictly sequential and best-effort: a rejected or unreachable request
//! is reported and skipped, never aborting the rest of the batch.
//!
//! ## Quick start
//!
//! ```no_run
//! use vozgen::{DialogueScript, DialogueSynthesizer, TtsClient};
//!
//! let client = TtsClient::new("your-elevenlabs-api-key");
//! let synth = DialogueSynthesizer::new(client, "audios");
//!
//! let script = DialogueScript::sample();
//! let report = synth.run(&script).unwrap();
//! println!("{} saved, {} failed", report.saved(), report.failed());
//! ```
//!
//! Scripts are plain JSON arrays (see `demos/dialogo.json`):
//!
//! ```no_run
//! use std::path::Path;
//! use vozgen::DialogueScript;
//!
//! let script = DialogueScript::from_json_file(Path::new("demos/dialogo.json")).unwrap();
//! ```
//!
//! ## Pipeline
//! 1. Load the script (JSON file or the bundled sample).
//! 2. For each utterance, `POST {base_url}{voice_id}` with the text and
//!    fixed voice settings (`stability = 0.5`, `similarity_boost = 0.75`).
//! 3. On 200, write the MP3 bytes to `{index}_{speaker}.mp3` and print a
//!    success notice; on anything else, print an error notice and move on.

pub mod client;
pub mod script;
pub mod synth;

// ─── Re-exports for convenience ─────────────────────────────────────────────

pub use client::{TtsClient, TtsError, VoiceSettings, ELEVENLABS_API_BASE};
pub use script::{DialogueScript, Utterance};
pub use synth::{BatchReport, DialogueSynthesizer, UtteranceOutcome, DEFAULT_OUT_DIR};
