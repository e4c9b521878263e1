use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Decoding parameters forwarded to the text-generation service.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub timeout_secs: u64,
    pub max_new_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub repetition_penalty: f64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "google/flan-t5-base".to_string(),
            timeout_secs: 60,
            max_new_tokens: 140,
            temperature: 0.6,
            top_p: 0.9,
            repetition_penalty: 1.15,
        }
    }
}

/// Controls how many reviews end up in `reviews_sample.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleSettings {
    /// Reviews drawn per cluster and sentiment label.
    pub per_label: usize,
    /// Upper bound on the shuffled sample.
    pub cap: usize,
    pub seed: u64,
}

impl Default for SampleSettings {
    fn default() -> Self {
        Self {
            per_label: 20,
            cap: 500,
            seed: 42,
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Base URL of a text-generation-inference server. `None` means offline.
    pub generator_url: Option<String>,
    /// Briefs sessions the server holds before evicting the oldest.
    pub max_sessions: usize,
    pub generation: GenerationSettings,
    pub sample: SampleSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            env: Environment::Development,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            log_level: "info".to_string(),
            data_dir: PathBuf::from("."),
            output_dir: PathBuf::from("webapp/data"),
            generator_url: None,
            max_sessions: 64,
            generation: GenerationSettings::default(),
            sample: SampleSettings::default(),
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("data_dir", &self.data_dir)
            .field("output_dir", &self.output_dir)
            .field(
                "generator_url",
                &self.generator_url.as_ref().map(|_| "[redacted]"),
            )
            .field("max_sessions", &self.max_sessions)
            .field("generation", &self.generation)
            .field("sample", &self.sample)
            .finish()
    }
}
