//! Batch synthesis loop — one request per utterance, one MP3 per success.
//!
//! Utterances are processed strictly in order; each one is fully resolved
//! (request sent, response handled, file written) before the next starts.
//! A failed utterance never stops the batch: it is recorded in the report,
//! a notice is printed, and the loop moves on.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::client::{TtsClient, TtsError};
use crate::script::DialogueScript;

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUT_DIR: &str = "audios";

// ─────────────────────────────────────────────────────────────────────────────
// Per-utterance outcome
// ─────────────────────────────────────────────────────────────────────────────

/// How a single utterance ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UtteranceOutcome {
    /// Audio written to this path.
    Saved(PathBuf),
    /// The API answered with a non-200 status; nothing was written.
    Rejected { status: u16, body: String },
    /// The request never got an HTTP answer (connection, DNS, timeout);
    /// nothing was written.
    Transport(String),
}

/// Ordered outcomes for a whole batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub outcomes: Vec<UtteranceOutcome>,
}

impl BatchReport {
    /// Number of utterances whose audio file was written.
    pub fn saved(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, UtteranceOutcome::Saved(_)))
            .count()
    }

    /// Number of utterances that produced no file.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.saved()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// DialogueSynthesizer
// ─────────────────────────────────────────────────────────────────────────────

/// Drives the one-shot batch conversion of a [`DialogueScript`].
#[derive(Debug)]
pub struct DialogueSynthesizer {
    client: TtsClient,
    out_dir: PathBuf,
}

impl DialogueSynthesizer {
    /// All configuration is taken here; nothing is read from globals.
    pub fn new(client: TtsClient, out_dir: impl Into<PathBuf>) -> Self {
        Self { client, out_dir: out_dir.into() }
    }

    /// Output path for the utterance at 1-based position `index`.
    fn output_path(&self, index: usize, speaker: &str) -> PathBuf {
        self.out_dir.join(format!("{}_{}.mp3", index, speaker))
    }

    /// Run the whole batch, printing one notice per utterance.
    ///
    /// Creates the output directory first (no error if it already exists).
    /// Files from a previous run with the same script are overwritten.
    /// Only filesystem trouble aborts the run — directory creation or a
    /// file write failing mid-batch; API rejections and transport failures
    /// are per-utterance outcomes and the loop always continues.
    pub fn run(&self, script: &DialogueScript) -> Result<BatchReport> {
        fs::create_dir_all(&self.out_dir).with_context(|| {
            format!("Cannot create output directory: {}", self.out_dir.display())
        })?;

        let mut outcomes = Vec::with_capacity(script.len());
        for (i, utterance) in script.utterances.iter().enumerate() {
            let index = i + 1;
            let outcome = match self.client.synthesize(&utterance.voice_id, &utterance.text) {
                Ok(audio) => {
                    let path = self.output_path(index, &utterance.speaker);
                    write_audio(&path, &audio)?;
                    println!("Saved: {}", path.display());
                    UtteranceOutcome::Saved(path)
                }
                Err(TtsError::Rejected { status, body }) => {
                    println!(
                        "Error on utterance {} ({}): HTTP {} - {}",
                        index, utterance.speaker, status, body
                    );
                    UtteranceOutcome::Rejected { status, body }
                }
                Err(TtsError::Transport(e)) => {
                    println!("Error on utterance {} ({}): {}", index, utterance.speaker, e);
                    UtteranceOutcome::Transport(e.to_string())
                }
            };
            outcomes.push(outcome);
        }

        Ok(BatchReport { outcomes })
    }
}

/// Write response bytes to disk verbatim — no format validation.
fn write_audio(path: &Path, audio: &[u8]) -> Result<()> {
    fs::write(path, audio)
        .with_context(|| format!("Cannot write audio file: {}", path.display()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Utterance;
    use httpmock::prelude::*;

    const ANA_PATH: &str = "/v1/text-to-speech/voz_ana_id";
    const PEDRO_PATH: &str = "/v1/text-to-speech/voz_pedro_id";

    fn synthesizer_for(server: &MockServer, out_dir: &Path) -> DialogueSynthesizer {
        let client = TtsClient::with_base_url("test-key", server.url("/v1/text-to-speech/"));
        DialogueSynthesizer::new(client, out_dir)
    }

    #[test]
    fn test_all_success_writes_all_files_in_order() {
        let server = MockServer::start();
        let ana = server.mock(|when, then| {
            when.method(POST).path(ANA_PATH);
            then.status(200).body("ana-bytes");
        });
        let pedro = server.mock(|when, then| {
            when.method(POST).path(PEDRO_PATH);
            then.status(200).body("pedro-bytes");
        });

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("audios");
        let report = synthesizer_for(&server, &out).run(&DialogueScript::sample()).unwrap();

        assert_eq!(report.saved(), 3);
        assert_eq!(report.failed(), 0);
        assert_eq!(fs::read(out.join("1_Ana.mp3")).unwrap(), b"ana-bytes");
        assert_eq!(fs::read(out.join("2_Pedro.mp3")).unwrap(), b"pedro-bytes");
        assert_eq!(fs::read(out.join("3_Ana.mp3")).unwrap(), b"ana-bytes");
        assert_eq!(ana.hits(), 2);
        assert_eq!(pedro.hits(), 1);
    }

    #[test]
    fn test_rejected_utterance_skipped_batch_continues() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(ANA_PATH);
            then.status(200).body("ana-bytes");
        });
        server.mock(|when, then| {
            when.method(POST).path(PEDRO_PATH);
            then.status(403).body("voice not allowed");
        });

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("audios");
        let report = synthesizer_for(&server, &out).run(&DialogueScript::sample()).unwrap();

        assert_eq!(report.saved(), 2);
        assert_eq!(report.failed(), 1);
        assert!(out.join("1_Ana.mp3").exists());
        assert!(!out.join("2_Pedro.mp3").exists());
        assert!(out.join("3_Ana.mp3").exists());
        assert_eq!(
            report.outcomes[1],
            UtteranceOutcome::Rejected { status: 403, body: "voice not allowed".into() }
        );
    }

    #[test]
    fn test_transport_failure_batch_continues() {
        // Nothing listens on port 1; every utterance fails below HTTP.
        let client = TtsClient::with_base_url("k", "http://127.0.0.1:1/tts/");
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("audios");
        let synth = DialogueSynthesizer::new(client, &out);

        let report = synth.run(&DialogueScript::sample()).unwrap();

        assert_eq!(report.saved(), 0);
        assert_eq!(report.failed(), 3);
        assert!(report
            .outcomes
            .iter()
            .all(|o| matches!(o, UtteranceOutcome::Transport(_))));
        // Directory is still created; no files inside.
        assert!(out.is_dir());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }

    #[test]
    fn test_rerun_overwrites_same_names() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("audios");

        // Two servers standing in for two runs with different API output.
        let first = MockServer::start();
        first.mock(|when, then| {
            when.method(POST);
            then.status(200).body("first-run");
        });
        synthesizer_for(&first, &out).run(&DialogueScript::sample()).unwrap();

        let second = MockServer::start();
        second.mock(|when, then| {
            when.method(POST);
            then.status(200).body("second-run");
        });
        synthesizer_for(&second, &out).run(&DialogueScript::sample()).unwrap();

        // Same three names, second run's bytes.
        let names: Vec<String> = {
            let mut v: Vec<String> = fs::read_dir(&out)
                .unwrap()
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect();
            v.sort();
            v
        };
        assert_eq!(names, ["1_Ana.mp3", "2_Pedro.mp3", "3_Ana.mp3"]);
        assert_eq!(fs::read(out.join("2_Pedro.mp3")).unwrap(), b"second-run");
    }

    #[test]
    fn test_existing_out_dir_is_reused() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(200).body("x");
        });

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("audios");
        fs::create_dir_all(&out).unwrap();

        let report = synthesizer_for(&server, &out).run(&DialogueScript::sample()).unwrap();
        assert_eq!(report.saved(), 3);
    }

    #[test]
    fn test_empty_script_creates_dir_and_nothing_else() {
        let server = MockServer::start();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("audios");

        let script = DialogueScript { utterances: Vec::new() };
        let report = synthesizer_for(&server, &out).run(&script).unwrap();

        assert!(report.outcomes.is_empty());
        assert!(out.is_dir());
    }

    #[test]
    fn test_index_is_one_based_and_speaker_named() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(200).body("x");
        });

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("audios");
        let script = DialogueScript {
            utterances: vec![Utterance {
                speaker: "Narrator".into(),
                voice_id: "v".into(),
                text: "Era uma vez.".into(),
            }],
        };

        synthesizer_for(&server, &out).run(&script).unwrap();
        assert!(out.join("1_Narrator.mp3").exists());
    }
}
