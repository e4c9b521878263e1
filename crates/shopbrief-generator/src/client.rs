//! HTTP client for a text-generation-inference server.
//!
//! Wraps `reqwest` with the `/generate` request shape, the configured decoding
//! parameters, and typed response handling. Calls are made once; there is no
//! retry.

use std::time::Duration;

use reqwest::{Client, Url};
use shopbrief_brief::{GenerateError, SummaryGenerator, SummaryRequest};
use shopbrief_core::GenerationSettings;

use crate::error::GeneratorError;
use crate::types::{GenerateParameters, GenerateRequest, GenerateResponse};

/// Prompts are cut to this many characters before sending, roughly the
/// 384-token input window of the default model.
const MAX_PROMPT_CHARS: usize = 384 * 4;

/// Client for the `/generate` endpoint.
///
/// Use [`TgiClient::new`] with a server base URL; tests point it at a
/// wiremock server the same way.
pub struct TgiClient {
    client: Client,
    base_url: Url,
    model: String,
    parameters: GenerateParameters,
}

impl TgiClient {
    /// Creates a client for the server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeneratorError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn new(base_url: &str, settings: &GenerationSettings) -> Result<Self, GeneratorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("shopbrief/0.1 (category-summaries)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // joining "generate" appends a path segment instead of replacing one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GeneratorError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            model: settings.model.clone(),
            parameters: GenerateParameters::from(settings),
        })
    }

    #[must_use]
    pub fn parameters(&self) -> &GenerateParameters {
        &self.parameters
    }

    /// Sends `prompt` to `/generate` and returns the trimmed generated text.
    ///
    /// # Errors
    ///
    /// - [`GeneratorError::Http`] on network failure.
    /// - [`GeneratorError::UnexpectedStatus`] on a non-2xx response.
    /// - [`GeneratorError::Deserialize`] if the body does not match either
    ///   response shape.
    /// - [`GeneratorError::EmptyOutput`] if the text is empty.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, GeneratorError> {
        let url = self.generate_url();
        let inputs = truncate_chars(prompt, MAX_PROMPT_CHARS);
        if inputs.len() < prompt.len() {
            tracing::warn!(
                prompt_chars = prompt.chars().count(),
                max_chars = MAX_PROMPT_CHARS,
                "prompt truncated before generation"
            );
        }

        let request = GenerateRequest {
            inputs,
            parameters: &self.parameters,
        };
        let response = self.client.post(url.clone()).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeneratorError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| GeneratorError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;

        let text = parsed
            .into_text()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(GeneratorError::EmptyOutput)?;

        tracing::debug!(model = %self.model, chars = text.len(), "generation complete");
        Ok(text)
    }

    fn generate_url(&self) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("generate");
        }
        url
    }
}

impl SummaryGenerator for TgiClient {
    async fn generate(&self, request: SummaryRequest<'_>) -> Result<String, GenerateError> {
        self.generate_text(request.prompt)
            .await
            .map_err(|e| GenerateError::with_source("text-generation request failed", e))
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn provider(&self) -> &str {
        "huggingface"
    }
}

/// Returns the longest prefix of `text` with at most `max` characters.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
