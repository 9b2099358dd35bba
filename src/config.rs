//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::assistant::AssistantConfig as AssistantClientConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub assistant: AssistantConfig,

    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Account database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

fn default_database_path() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("brill").join("brill.db").to_string_lossy().to_string())
        .unwrap_or_else(|| "./brill_data/brill.db".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Empty means any origin is allowed
    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Directory with the built site, served for any non-API path
    #[serde(default)]
    pub static_dir: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            request_timeout_secs: default_request_timeout(),
            static_dir: None,
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// AI assistant configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_ai_url")]
    pub api_url: String,

    #[serde(default = "default_ai_model")]
    pub model: String,

    /// Usually supplied through `OPENAI_API_KEY` rather than the file
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_ai_timeout")]
    pub request_timeout_ms: u64,
}

fn default_ai_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_ai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f32 {
    0.7
}

fn default_ai_timeout() -> u64 {
    30_000
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_url: default_ai_url(),
            model: default_ai_model(),
            api_key: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            request_timeout_ms: default_ai_timeout(),
        }
    }
}

impl AssistantConfig {
    /// Settings for the chat-completions client
    pub fn client_config(&self) -> AssistantClientConfig {
        AssistantClientConfig {
            api_url: self.api_url.clone(),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            request_timeout_ms: self.request_timeout_ms,
        }
    }
}

/// Terminal client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_server_url")]
    pub server_url: String,

    #[serde(default = "default_session_file")]
    pub session_file: String,
}

fn default_server_url() -> String {
    "http://localhost:8082".to_string()
}

fn default_session_file() -> String {
    dirs::config_dir()
        .map(|p| p.join("brill").join("session.json").to_string_lossy().to_string())
        .unwrap_or_else(|| "./brill_session.json".to_string())
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            session_file: default_session_file(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment.
    ///
    /// Nothing is logged here; the caller reports the outcome once its
    /// subscriber is installed.
    pub fn load_default() -> LoadedConfig {
        Self::load_first(&Self::default_paths())
    }

    /// First readable file among `paths`, else defaults. Env overrides apply
    /// either way.
    pub fn load_first(paths: &[PathBuf]) -> LoadedConfig {
        let mut failures = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    return LoadedConfig {
                        config,
                        source: Some(path.clone()),
                        failures,
                    }
                }
                Err(e) => failures.push(e),
            }
        }

        LoadedConfig {
            config: Self::from_env(),
            source: None,
            failures,
        }
    }

    /// Candidate config files, in lookup order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("brill").join("config.toml")),
            Some(PathBuf::from("/etc/brill/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Storage
        if let Some(path) = lookup("BRILL_DATABASE_PATH") {
            self.storage.database_path = path;
        }

        // API
        if let Some(host) = lookup("BRILL_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("BRILL_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }
        if let Some(dir) = lookup("BRILL_STATIC_DIR") {
            self.api.static_dir = Some(dir);
        }

        // Assistant
        if let Some(url) = lookup("BRILL_AI_URL") {
            self.assistant.api_url = url;
        }
        if let Some(model) = lookup("BRILL_AI_MODEL") {
            self.assistant.model = model;
        }
        if let Some(key) = lookup("OPENAI_API_KEY") {
            self.assistant.api_key = Some(key);
        }

        // Client
        if let Some(url) = lookup("BRILL_SERVER_URL") {
            self.client.server_url = url;
        }
        if let Some(file) = lookup("BRILL_SESSION_FILE") {
            self.client.session_file = file;
        }

        // Logging
        if let Some(level) = lookup("BRILL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("BRILL_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Expand a leading `~/` to the home directory
pub fn expand_path(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}

/// Result of [`Config::load_default`]
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the config came from; `None` means defaults
    pub source: Option<PathBuf>,
    /// Files that exist but could not be used
    pub failures: Vec<ConfigError>,
}

impl LoadedConfig {
    pub fn report(&self) {
        for failure in &self.failures {
            tracing::warn!("{}", failure);
        }
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# BRILL Configuration
#
# Environment variables override these settings:
# - BRILL_DATABASE_PATH
# - BRILL_API_HOST
# - BRILL_API_PORT
# - BRILL_STATIC_DIR
# - BRILL_AI_URL
# - BRILL_AI_MODEL
# - OPENAI_API_KEY
# - BRILL_SERVER_URL
# - BRILL_SESSION_FILE
# - BRILL_LOG_LEVEL
# - BRILL_LOG_FORMAT

[storage]
# SQLite database with accounts and transactions
database_path = "~/.local/share/brill/brill.db"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8082

# Allowed CORS origins (empty = any origin)
cors_origins = []

# Request timeout in seconds
request_timeout_secs = 30

# Built site to serve alongside the API
# static_dir = "./brill-ui/dist"

[assistant]
# OpenAI-compatible chat-completions endpoint
api_url = "https://api.openai.com/v1/chat/completions"

# Model name
model = "gpt-4o-mini"

# Reply length cap
max_tokens = 500

# Sampling temperature
temperature = 0.7

# Upstream timeout (ms)
request_timeout_ms = 30000

# API key; prefer the OPENAI_API_KEY environment variable
# api_key = ""

[client]
# Server used by brill-cli
server_url = "http://localhost:8082"

# Where brill-cli keeps brill_user / brill_token
session_file = "~/.config/brill/session.json"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/brill/brill.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.port, 8082);
        assert!(config.api.cors_origins.is_empty());
        assert_eq!(config.assistant.model, "gpt-4o-mini");
        assert_eq!(config.assistant.max_tokens, 500);
        assert!(config.assistant.api_key.is_none());
        assert!(config.storage.database_path.ends_with("brill.db"));
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.host, "0.0.0.0");
        assert_eq!(config.client.server_url, "http://localhost:8082");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.api.static_dir.is_none());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nport = 9000\n\n[assistant]\nmodel = \"gpt-4o\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.host, "0.0.0.0");
        assert_eq!(config.assistant.model, "gpt-4o");
        assert_eq!(config.assistant.max_tokens, 500);
    }

    #[test]
    fn test_load_errors() {
        let err = Config::load(Path::new("/nonexistent/brill.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nport = ").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_first_skips_broken_file() {
        let mut broken = tempfile::NamedTempFile::new().unwrap();
        writeln!(broken, "[api\nport = ").unwrap();
        let mut good = tempfile::NamedTempFile::new().unwrap();
        writeln!(good, "[api]\nhost = \"127.0.0.1\"").unwrap();

        let paths = vec![
            PathBuf::from("/nonexistent/brill.toml"),
            broken.path().to_path_buf(),
            good.path().to_path_buf(),
        ];
        let loaded = Config::load_first(&paths);

        assert_eq!(loaded.source.as_deref(), Some(good.path()));
        assert_eq!(loaded.config.api.host, "127.0.0.1");
        assert_eq!(loaded.failures.len(), 1);
        assert!(matches!(loaded.failures[0], ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_first_falls_back_to_defaults() {
        let mut broken = tempfile::NamedTempFile::new().unwrap();
        writeln!(broken, "port = = 1").unwrap();

        let loaded = Config::load_first(&[broken.path().to_path_buf()]);
        assert!(loaded.source.is_none());
        assert_eq!(loaded.failures.len(), 1);
        assert!(loaded.failures[0].to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("BRILL_API_PORT", "9100"),
            ("BRILL_DATABASE_PATH", "/tmp/b.db"),
            ("OPENAI_API_KEY", "sk-1"),
            ("BRILL_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.port, 9100);
        assert_eq!(config.storage.database_path, "/tmp/b.db");
        assert_eq!(config.assistant.api_key.as_deref(), Some("sk-1"));
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.assistant.client_config().api_key.as_deref(), Some("sk-1"));
    }

    #[test]
    fn test_expand_path() {
        assert_eq!(expand_path("/var/lib/brill.db"), PathBuf::from("/var/lib/brill.db"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~/brill.db"), home.join("brill.db"));
        }
    }

    #[test]
    fn test_bad_port_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "BRILL_API_PORT").then(|| "abc".to_string()));
        assert_eq!(config.api.port, 8082);
    }
}
