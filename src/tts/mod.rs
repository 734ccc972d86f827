pub mod openai;
pub mod pipeline;

pub use openai::OpenAiSpeech;
pub use pipeline::{ AudioPipeline, VOICES };

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("request failed: {0}")]
    Network(Box<reqwest::Error>),

    #[error("service returned HTTP {status}: {message}")]
    Service { status: u16, message: String },

    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,
}

impl From<reqwest::Error> for SynthesisError {
    fn from(error: reqwest::Error) -> Self {
        SynthesisError::Network(Box::new(error))
    }
}

/// Seam to the external speech service: text plus a voice identifier in,
/// encoded audio bytes out. Failures are per query and never abort a run.
pub trait SpeechSynthesizer {
    fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, SynthesisError>;
}

impl<S: SpeechSynthesizer + ?Sized> SpeechSynthesizer for &S {
    fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, SynthesisError> {
        (**self).synthesize(text, voice)
    }
}
