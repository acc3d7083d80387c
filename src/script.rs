//! Dialogue script model — the ordered list of utterances to synthesize.
//!
//! A script is a plain JSON array, one object per dialogue line:
//!
//! ```json
//! [
//!   { "speaker": "Ana", "voice_id": "voz_ana_id", "text": "Oi Pedro!" }
//! ]
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One line of dialogue: who says it, with which synthetic voice, and what.
///
/// The `speaker` label also names the output file (`{index}_{speaker}.mp3`),
/// and `voice_id` is the opaque voice selector the remote API understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    pub speaker: String,
    pub voice_id: String,
    pub text: String,
}

/// An ordered dialogue script. Order is the synthesis order and determines
/// the 1-based index in output filenames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DialogueScript {
    pub utterances: Vec<Utterance>,
}

impl DialogueScript {
    /// Parse a script from a JSON string (a bare array of utterances).
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse dialogue script JSON")
    }

    /// Load a script from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Cannot read script file: {}", path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse dialogue script: {}", path.display()))
    }

    /// The bundled sample dialogue (same content as `demos/dialogo.json`).
    pub fn sample() -> Self {
        let line = |speaker: &str, voice_id: &str, text: &str| Utterance {
            speaker: speaker.to_string(),
            voice_id: voice_id.to_string(),
            text: text.to_string(),
        };
        Self {
            utterances: vec![
                line("Ana", "voz_ana_id", "Oi Pedro, como está o tempo hoje?"),
                line("Pedro", "voz_pedro_id", "Está ensolarado, mas acho que vai chover à tarde."),
                line("Ana", "voz_ana_id", "Então é melhor levar um guarda-chuva."),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.utterances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utterances.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
