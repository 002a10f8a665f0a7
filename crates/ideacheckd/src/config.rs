//! Configuration management for ideacheckd.
//!
//! Loads settings from /etc/ideacheck/config.toml or uses defaults.
//! Credentials are never read from here; see `credentials`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Config file path
pub const CONFIG_PATH: &str = "/etc/ideacheck/config.toml";

/// Default config file path for fallback
pub const DEFAULT_CONFIG_PATH: &str = "/var/lib/ideacheck/config.toml";

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind, e.g. "127.0.0.1:8787"
    #[serde(default = "default_listen")]
    pub listen: String,
}

fn default_listen() -> String {
    "127.0.0.1:8787".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

/// Generative model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API base, without trailing slash
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// Models tried in order before discovery
    #[serde(default = "default_candidate_models")]
    pub candidate_models: Vec<String>,

    /// Model families accepted during discovery, in preference order
    #[serde(default = "default_preferred_families")]
    pub preferred_families: Vec<String>,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1".to_string()
}

fn default_candidate_models() -> Vec<String> {
    vec!["gemini-2.0-flash".to_string()]
}

fn default_preferred_families() -> Vec<String> {
    vec![
        "gemini-1.5-flash".to_string(),
        "gemini-1.5-pro".to_string(),
        "gemini-1.0-pro".to_string(),
    ]
}

fn default_temperature() -> f64 {
    0.4
}

fn default_max_output_tokens() -> u32 {
    1024
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: default_gemini_base_url(),
            candidate_models: default_candidate_models(),
            preferred_families: default_preferred_families(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

/// Search provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerpConfig {
    #[serde(default = "default_serp_base_url")]
    pub base_url: String,

    #[serde(default = "default_engine")]
    pub engine: String,

    /// Related searches kept per lookup
    #[serde(default = "default_max_related")]
    pub max_related: usize,
}

fn default_serp_base_url() -> String {
    "https://serpapi.com".to_string()
}

fn default_engine() -> String {
    "google".to_string()
}

fn default_max_related() -> usize {
    10
}

impl Default for SerpConfig {
    fn default() -> Self {
        Self {
            base_url: default_serp_base_url(),
            engine: default_engine(),
            max_related: default_max_related(),
        }
    }
}

/// Outbound HTTP client configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout. Unset means the transport default (none).
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Full daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub gemini: GeminiConfig,

    #[serde(default)]
    pub serp: SerpConfig,

    #[serde(default)]
    pub http: HttpConfig,
}

impl Config {
    /// Load config from file, or return defaults
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_PATH)
            .or_else(|_| Self::load_from_path(DEFAULT_CONFIG_PATH))
            .unwrap_or_else(|e| {
                warn!("Config not found, using defaults: {}", e);
                Config::default()
            })
    }

    /// Load config from specific path
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn http_timeout(&self) -> Option<Duration> {
        self.http.timeout_secs.map(Duration::from_secs)
    }

    /// Build the shared outbound client
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("ideacheckd/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = self.http_timeout() {
            builder = builder.timeout(timeout);
        }
        builder.build().context("Failed to build HTTP client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.listen, "127.0.0.1:8787");
        assert_eq!(config.gemini.candidate_models, vec!["gemini-2.0-flash"]);
        assert_eq!(config.gemini.preferred_families.len(), 3);
        assert_eq!(config.gemini.max_output_tokens, 1024);
        assert_eq!(config.serp.max_related, 10);
        assert!(config.http_timeout().is_none());
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml_str = r#"
[gemini]
candidate_models = ["gemini-2.5-flash", "gemini-2.0-flash"]

[http]
timeout_secs = 30
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gemini.candidate_models.len(), 2);
        // Unspecified fields keep defaults
        assert_eq!(config.gemini.temperature, 0.4);
        assert_eq!(config.serp.engine, "google");
        assert_eq!(config.http_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nlisten = \"0.0.0.0:9000\"").unwrap();

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.server.listen, "0.0.0.0:9000");
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        assert!(Config::load_from_path("/nonexistent/ideacheck.toml").is_err());
    }
}
