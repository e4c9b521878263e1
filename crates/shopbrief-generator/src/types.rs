//! Wire types for the text-generation-inference `/generate` endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct GenerateRequest<'a> {
    pub inputs: &'a str,
    pub parameters: &'a GenerateParameters,
}

/// Decoding parameters sent with every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateParameters {
    pub max_new_tokens: u32,
    pub do_sample: bool,
    pub temperature: f64,
    pub top_p: f64,
    pub repetition_penalty: f64,
}

impl From<&shopbrief_core::GenerationSettings> for GenerateParameters {
    fn from(settings: &shopbrief_core::GenerationSettings) -> Self {
        Self {
            max_new_tokens: settings.max_new_tokens,
            do_sample: true,
            temperature: settings.temperature,
            top_p: settings.top_p,
            repetition_penalty: settings.repetition_penalty,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeneratedText {
    pub generated_text: String,
}

/// TGI answers with an object; the hosted inference API wraps it in an array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum GenerateResponse {
    Single(GeneratedText),
    Batch(Vec<GeneratedText>),
}

impl GenerateResponse {
    pub(crate) fn into_text(self) -> Option<String> {
        match self {
            GenerateResponse::Single(g) => Some(g.generated_text),
            GenerateResponse::Batch(items) => items.into_iter().next().map(|g| g.generated_text),
        }
    }
}
