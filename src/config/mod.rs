use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub output: OutputConfig,
}

/// Where the daily CSV comes from and how it is requested
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    pub symbol: String,
    pub url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

/// Where the fixture lands
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
}

// ── Defaults ─────────────────────────────────────────────────────────────────

fn default_symbol() -> String {
    "MSFT".to_string()
}
fn default_url() -> String {
    "https://stooq.com/q/d/l/?s=msft.us&i=d".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_user_agent() -> String {
    "mochart-fetch/1.0".to_string()
}
fn default_output_path() -> PathBuf {
    PathBuf::from("fixtures/MSFT.json")
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            url: default_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

impl SourceConfig {
    /// Parsed source URL. Rejects anything `reqwest` could not request.
    pub fn endpoint(&self) -> Result<Url> {
        Url::parse(&self.url).with_context(|| format!("Invalid source url {:?}", self.url))
    }
}

// ── Loader ───────────────────────────────────────────────────────────────────

impl AppConfig {
    /// Load configuration from optional files + environment overrides.
    /// With nothing present this is exactly `AppConfig::default()`.
    pub fn load() -> Result<Self> {
        let builder = config::Config::builder()
            .add_source(
                config::File::with_name("config/default")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(
                config::File::with_name("config/local")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(config::Environment::with_prefix("MOCHART").separator("__"));

        Self::from_builder(builder)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        builder
            .build()
            .context("Failed to assemble configuration sources")?
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
