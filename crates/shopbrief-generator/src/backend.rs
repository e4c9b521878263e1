use shopbrief_brief::{FactsOnly, GenerateError, SummaryGenerator, SummaryRequest};
use shopbrief_core::AppConfig;

use crate::client::TgiClient;
use crate::error::GeneratorError;

/// The generator picked at startup: the remote model when a server URL is
/// configured, the offline fact joiner otherwise.
pub enum AnyGenerator {
    Tgi(TgiClient),
    Facts(FactsOnly),
}

impl AnyGenerator {
    /// Builds the configured generator. `offline` forces [`FactsOnly`].
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError`] if the remote client cannot be built.
    pub fn from_config(config: &AppConfig, offline: bool) -> Result<Self, GeneratorError> {
        match config.generator_url.as_deref() {
            Some(url) if !offline => {
                tracing::info!(model = %config.generation.model, "using remote text generation");
                Ok(Self::Tgi(TgiClient::new(url, &config.generation)?))
            }
            _ => {
                tracing::info!("using offline fact summaries");
                Ok(Self::Facts(FactsOnly))
            }
        }
    }
}

impl SummaryGenerator for AnyGenerator {
    async fn generate(&self, request: SummaryRequest<'_>) -> Result<String, GenerateError> {
        match self {
            Self::Tgi(client) => client.generate(request).await,
            Self::Facts(facts) => facts.generate(request).await,
        }
    }

    fn model_name(&self) -> &str {
        match self {
            Self::Tgi(client) => client.model_name(),
            Self::Facts(facts) => facts.model_name(),
        }
    }

    fn provider(&self) -> &str {
        match self {
            Self::Tgi(client) => client.provider(),
            Self::Facts(facts) => facts.provider(),
        }
    }
}
