//! The seam between brief assembly and whatever writes the summary paragraph.

use std::future::Future;

use thiserror::Error;

use crate::markdown::{assemble_markdown, facts, generation_prompt};
use crate::types::ParsedBrief;

/// A failed generation call. Backends wrap their own error as the source.
#[derive(Debug, Error)]
#[error("summary generation failed: {message}")]
pub struct GenerateError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl GenerateError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Input for one summary: the full prompt and the bare fact lines it wraps.
#[derive(Debug, Clone, Copy)]
pub struct SummaryRequest<'a> {
    pub prompt: &'a str,
    pub facts: &'a str,
}

/// Produces the free-text summary paragraph for a category.
pub trait SummaryGenerator {
    fn generate(
        &self,
        request: SummaryRequest<'_>,
    ) -> impl Future<Output = Result<String, GenerateError>> + Send;

    /// Model identifier recorded in exports.
    fn model_name(&self) -> &str;

    /// Provider identifier recorded in exports.
    fn provider(&self) -> &str;
}

/// Offline generator: the summary is the fact lines joined into one paragraph.
#[derive(Debug, Clone, Copy, Default)]
pub struct FactsOnly;

impl SummaryGenerator for FactsOnly {
    async fn generate(&self, request: SummaryRequest<'_>) -> Result<String, GenerateError> {
        Ok(request
            .facts
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join(" "))
    }

    fn model_name(&self) -> &str {
        "facts-only"
    }

    fn provider(&self) -> &str {
        "local"
    }
}

/// Generates the summary paragraph for `brief` and assembles the full page.
///
/// # Errors
///
/// Returns [`GenerateError`] if the generator fails.
pub async fn build_full_markdown<G: SummaryGenerator>(
    brief: &ParsedBrief,
    generator: &G,
) -> Result<String, GenerateError> {
    let facts = facts(brief);
    let prompt = generation_prompt(&facts);
    let summary = generator
        .generate(SummaryRequest {
            prompt: &prompt,
            facts: &facts,
        })
        .await?;

    tracing::debug!(
        category = %brief.category,
        model = generator.model_name(),
        summary_chars = summary.len(),
        "generated category summary"
    );

    Ok(assemble_markdown(brief, summary.trim()))
}
