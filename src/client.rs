//! ElevenLabs text-to-speech HTTP client.
//!
//! One synthesis call is one `POST {base_url}{voice_id}` with the vendor
//! credential in the `xi-api-key` header and a JSON body of the form:
//!
//! ```json
//! { "text": "…", "voice_settings": { "stability": 0.5, "similarity_boost": 0.75 } }
//! ```
//!
//! A 200 response carries the finished MP3 bytes; any other status carries a
//! textual error body.

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// Default ElevenLabs endpoint template; the voice ID is appended verbatim.
pub const ELEVENLABS_API_BASE: &str = "https://api.elevenlabs.io/v1/text-to-speech/";

// ─────────────────────────────────────────────────────────────────────────────
// Request body
// ─────────────────────────────────────────────────────────────────────────────

/// Voice-shaping parameters sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self { stability: 0.5, similarity_boost: 0.75 }
    }
}

/// The full request body. `text` and `voice_settings` only — the API treats
/// unknown fields as errors on some model versions, so nothing else is sent.
#[derive(Serialize)]
struct TtsRequest<'a> {
    text: &'a str,
    voice_settings: VoiceSettings,
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Why a single synthesis call failed.
///
/// `Rejected` is the API saying no (bad key, unknown voice, quota); the body
/// is the raw response text. `Transport` is everything below HTTP: connection
/// refused, DNS, timeouts.
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("HTTP {status} - {body}")]
    Rejected { status: u16, body: String },

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

// ─────────────────────────────────────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────────────────────────────────────

/// Synchronous client for an ElevenLabs-compatible TTS endpoint.
#[derive(Clone)]
pub struct TtsClient {
    http: Client,
    api_key: String,
    base_url: String,
    voice_settings: VoiceSettings,
}

impl std::fmt::Debug for TtsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtsClient")
            .field("base_url", &self.base_url)
            .field("voice_settings", &self.voice_settings)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl TtsClient {
    /// Create a client against the public ElevenLabs API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, ELEVENLABS_API_BASE)
    }

    /// Create a client against a custom endpoint template (tests, proxies,
    /// self-hosted compatible servers). The voice ID is appended to
    /// `base_url` without a separator, so include the trailing slash.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
            voice_settings: VoiceSettings::default(),
        }
    }

    /// Override the default voice-shaping parameters.
    pub fn voice_settings(mut self, settings: VoiceSettings) -> Self {
        self.voice_settings = settings;
        self
    }

    /// Synthesize one utterance. Returns the raw audio bytes exactly as the
    /// API sent them — no validation, no re-encoding.
    pub fn synthesize(&self, voice_id: &str, text: &str) -> Result<Vec<u8>, TtsError> {
        let url = format!("{}{}", self.base_url, voice_id);
        let body = TtsRequest { text, voice_settings: self.voice_settings };

        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "audio/mpeg")
            .header(CONTENT_TYPE, "application/json")
            .header("xi-api-key", &self.api_key)
            .json(&body)
            .send()?;

        // Only 200 counts as success; the API signals everything else with a
        // textual error body.
        let status = response.status();
        if status == StatusCode::OK {
            Ok(response.bytes()?.to_vec())
        } else {
            Err(TtsError::Rejected {
                status: status.as_u16(),
                body: response.text()?,
            })
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
