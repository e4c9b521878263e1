use crate::app_config::{AppConfig, Environment, GenerationSettings, SampleSettings};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can use a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let defaults = GenerationSettings::default();
    let sample_defaults = SampleSettings::default();

    let env = parse_environment(&or_default("SHOPBRIEF_ENV", "development"))?;
    let bind_addr: SocketAddr = parse_as(
        "SHOPBRIEF_BIND_ADDR",
        &or_default("SHOPBRIEF_BIND_ADDR", "0.0.0.0:3000"),
    )?;
    let log_level = or_default("SHOPBRIEF_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("SHOPBRIEF_DATA_DIR", "."));
    let output_dir = PathBuf::from(or_default("SHOPBRIEF_OUTPUT_DIR", "webapp/data"));
    let generator_url = lookup("SHOPBRIEF_GENERATOR_URL")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let max_sessions: usize = parse_as(
        "SHOPBRIEF_MAX_SESSIONS",
        &or_default("SHOPBRIEF_MAX_SESSIONS", "64"),
    )?;
    if max_sessions == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPBRIEF_MAX_SESSIONS".to_string(),
            reason: "max sessions must be at least 1".to_string(),
        });
    }

    let model = or_default("SHOPBRIEF_GENERATOR_MODEL", &defaults.model);
    let timeout_secs: u64 = parse_as(
        "SHOPBRIEF_GENERATOR_TIMEOUT_SECS",
        &or_default(
            "SHOPBRIEF_GENERATOR_TIMEOUT_SECS",
            &defaults.timeout_secs.to_string(),
        ),
    )?;
    let max_new_tokens: u32 = parse_as(
        "SHOPBRIEF_GENERATOR_MAX_NEW_TOKENS",
        &or_default(
            "SHOPBRIEF_GENERATOR_MAX_NEW_TOKENS",
            &defaults.max_new_tokens.to_string(),
        ),
    )?;
    let temperature: f64 = parse_as(
        "SHOPBRIEF_GENERATOR_TEMPERATURE",
        &or_default(
            "SHOPBRIEF_GENERATOR_TEMPERATURE",
            &defaults.temperature.to_string(),
        ),
    )?;
    let top_p: f64 = parse_as(
        "SHOPBRIEF_GENERATOR_TOP_P",
        &or_default("SHOPBRIEF_GENERATOR_TOP_P", &defaults.top_p.to_string()),
    )?;
    let repetition_penalty: f64 = parse_as(
        "SHOPBRIEF_GENERATOR_REPETITION_PENALTY",
        &or_default(
            "SHOPBRIEF_GENERATOR_REPETITION_PENALTY",
            &defaults.repetition_penalty.to_string(),
        ),
    )?;

    if temperature.is_nan() || temperature <= 0.0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPBRIEF_GENERATOR_TEMPERATURE".to_string(),
            reason: format!("temperature must be positive, got {temperature}"),
        });
    }
    if top_p.is_nan() || top_p <= 0.0 || top_p > 1.0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPBRIEF_GENERATOR_TOP_P".to_string(),
            reason: format!("top_p must be in (0, 1], got {top_p}"),
        });
    }

    let per_label: usize = parse_as(
        "SHOPBRIEF_SAMPLE_PER_LABEL",
        &or_default(
            "SHOPBRIEF_SAMPLE_PER_LABEL",
            &sample_defaults.per_label.to_string(),
        ),
    )?;
    let cap: usize = parse_as(
        "SHOPBRIEF_SAMPLE_CAP",
        &or_default("SHOPBRIEF_SAMPLE_CAP", &sample_defaults.cap.to_string()),
    )?;
    let seed: u64 = parse_as(
        "SHOPBRIEF_SAMPLE_SEED",
        &or_default("SHOPBRIEF_SAMPLE_SEED", &sample_defaults.seed.to_string()),
    )?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        data_dir,
        output_dir,
        generator_url,
        max_sessions,
        generation: GenerationSettings {
            model,
            timeout_secs,
            max_new_tokens,
            temperature,
            top_p,
            repetition_penalty,
        },
        sample: SampleSettings {
            per_label,
            cap,
            seed,
        },
    })
}

/// Parse a trimmed env-var value, mapping failures to `InvalidEnvVar`.
fn parse_as<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s.trim() {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHOPBRIEF_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
