use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub store: StoreSettings,
    pub embedding: EmbeddingSettings,
    pub cache: CacheSettings,
    pub scoring: ScoringSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Profile/job store collaborator
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    pub timeout_secs: Option<u64>,
}

/// Text-embedding provider collaborator
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingSettings {
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    pub timeout_secs: Option<u64>,
    /// Bound on concurrent embed calls during a ranking pass
    pub concurrency: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub capacity: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_semantic_weight")]
    pub semantic: f64,
    #[serde(default = "default_skills_weight")]
    pub skills: f64,
    #[serde(default = "default_industry_stage_weight")]
    pub industry_stage: f64,
    #[serde(default = "default_numeric_weight")]
    pub numeric: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            semantic: default_semantic_weight(),
            skills: default_skills_weight(),
            industry_stage: default_industry_stage_weight(),
            numeric: default_numeric_weight(),
        }
    }
}

fn default_semantic_weight() -> f64 {
    0.50
}
fn default_skills_weight() -> f64 {
    0.30
}
fn default_industry_stage_weight() -> f64 {
    0.15
}
fn default_numeric_weight() -> f64 {
    0.05
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with NEPLAUNCH__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with NEPLAUNCH__)
            // e.g., NEPLAUNCH__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("NEPLAUNCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_key_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("NEPLAUNCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Pick up collaborator API keys from their conventional env vars so
/// secrets stay out of config files
fn apply_key_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let store_key = env::var("STORE_API_KEY")
        .or_else(|_| env::var("NEPLAUNCH__STORE__API_KEY"))
        .ok();
    let embedding_key = env::var("EMBEDDING_API_KEY")
        .or_else(|_| env::var("NEPLAUNCH__EMBEDDING__API_KEY"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(key) = store_key {
        builder = builder.set_override("store.api_key", key)?;
    }
    if let Some(key) = embedding_key {
        builder = builder.set_override("embedding.api_key", key)?;
    }

    builder.build()
}
