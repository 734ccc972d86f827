use std::{
    env,
    time::Duration,
};

use reqwest::blocking::Client;
use serde::Serialize;

use super::{
    SpeechSynthesizer,
    SynthesisError,
};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-4o-mini-tts";
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    // WAV so the files drop straight into the media directory
    response_format: &'a str,
}

/// Blocking client for an OpenAI-compatible speech endpoint. The API key is
/// only checked when a request is actually made, so dry runs work without
/// one.
pub struct OpenAiSpeech {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiSpeech {
    pub fn new(base_url: String, api_key: String, model: String) -> Result<Self, SynthesisError> {
        let client =
            Client::builder().timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS)).build()?;
        Ok(Self { client, base_url, api_key, model })
    }

    pub fn from_env() -> Result<Self, SynthesisError> {
        let api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        Self::new(DEFAULT_BASE_URL.to_string(), api_key, DEFAULT_MODEL.to_string())
    }

    fn speech_url(&self) -> String {
        format!("{}/v1/audio/speech", self.base_url)
    }
}

impl SpeechSynthesizer for OpenAiSpeech {
    fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, SynthesisError> {
        if self.api_key.is_empty() {
            return Err(SynthesisError::MissingApiKey);
        }

        let body = SpeechRequest {
            model: &self.model,
            input: text,
            voice,
            response_format: "wav",
        };

        let response = self
            .client
            .post(self.speech_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(SynthesisError::Service { status: status.as_u16(), message });
        }

        Ok(response.bytes()?.to_vec())
    }
}
