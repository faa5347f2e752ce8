//! Configuration management
//!
//! Configuration is read once at startup (TOML file + environment overrides)
//! and then passed around explicitly; nothing reads it from global state.

use crate::core::error::{Error, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default upstream model
pub const DEFAULT_MODEL: &str = "Pro/deepseek-ai/DeepSeek-V3";

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5000;

/// Global configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Full chat-completions endpoint URL
    pub api_url: String,
    /// Bearer token sent to the endpoint
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Feed upstream failures to the parser as "Error: ..." text instead of failing
    pub degrade_errors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            degrade_errors: false,
        }
    }
}

impl Config {
    /// Load configuration from an explicit file, `$FABAO_CONFIG`, or the default location,
    /// then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var("FABAO_CONFIG").ok().map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => {
                let path = Self::config_path()?;
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Config::default()
                }
            }
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigError {
            message: format!("Cannot read {}: {}", path.display(), e),
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Apply environment overrides using the given lookup
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |keys: &[&str]| {
            keys.iter()
                .find_map(|k| lookup(*k).filter(|v| !v.trim().is_empty()))
        };

        if let Some(url) = first(&["FABAO_API_URL", "CUSTOM_API_URL"]) {
            self.upstream.api_url = url;
        }
        if let Some(key) = first(&["FABAO_API_KEY", "OPENAI_API_KEY"]) {
            self.upstream.api_key = Some(key);
        }
        if let Some(model) = first(&["FABAO_MODEL"]) {
            self.upstream.model = model;
        }
        if let Some(host) = first(&["FABAO_HOST"]) {
            self.server.host = host;
        }
        if let Some(port) = first(&["FABAO_PORT"]).and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
    }

    /// Check the settings needed to reach the model service
    pub fn validate(&self) -> Result<()> {
        if self.upstream.api_url.trim().is_empty() {
            return Err(Error::ConfigError {
                message: "upstream.api_url is not set (config file or FABAO_API_URL)".to_string(),
            });
        }

        let url = url::Url::parse(&self.upstream.api_url).map_err(|e| Error::ConfigError {
            message: format!("upstream.api_url is not a valid URL: {}", e),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::ConfigError {
                message: format!("unsupported upstream scheme: {}", url.scheme()),
            });
        }

        if !(0.0..=2.0).contains(&self.upstream.temperature) {
            return Err(Error::ConfigError {
                message: format!(
                    "upstream.temperature must be within 0.0..=2.0, got {}",
                    self.upstream.temperature
                ),
            });
        }

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::fabao_home()?.join("config.toml"))
    }

    /// Get the fabao home directory
    pub fn fabao_home() -> Result<PathBuf> {
        if let Ok(home) = std::env::var("FABAO_HOME") {
            return Ok(PathBuf::from(home));
        }

        ProjectDirs::from("dev", "fabao", "fabao")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| Error::ConfigError {
                message: "Could not determine fabao home directory".to_string(),
            })
    }

    /// Socket address string for the HTTP server
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.upstream.model, DEFAULT_MODEL);
        assert_eq!(config.upstream.temperature, DEFAULT_TEMPERATURE);
        assert!(!config.upstream.degrade_errors);
        assert_eq!(config.bind_addr(), "127.0.0.1:5000");
    }

    #[test]
    fn test_from_file_partial() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[upstream]
api_url = "https://llm.example.com/v1/chat/completions"
api_key = "sk-test"
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(
            config.upstream.api_url,
            "https://llm.example.com/v1/chat/completions"
        );
        assert_eq!(config.upstream.api_key.as_deref(), Some("sk-test"));
        // untouched sections keep their defaults
        assert_eq!(config.upstream.model, DEFAULT_MODEL);
        assert_eq!(config.server.port, DEFAULT_PORT);
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fabao.toml");
        std::fs::write(&path, "[server]\nport = 8088\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.server.port, 8088);
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigError { .. }));
    }

    #[test]
    fn test_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[upstream\napi_url = ").unwrap();
        assert!(matches!(
            Config::from_file(&path).unwrap_err(),
            Error::TomlParse(_)
        ));
    }

    #[test]
    fn test_env_overrides() {
        let vars = env(&[
            ("CUSTOM_API_URL", "http://legacy/v1/chat/completions"),
            ("FABAO_API_URL", "http://primary/v1/chat/completions"),
            ("OPENAI_API_KEY", "sk-openai"),
            ("FABAO_PORT", "9000"),
            ("FABAO_MODEL", "  "),
        ]);
        let mut config = Config::default();
        config.apply_env(|k| vars.get(k).cloned());

        assert_eq!(config.upstream.api_url, "http://primary/v1/chat/completions");
        assert_eq!(config.upstream.api_key.as_deref(), Some("sk-openai"));
        assert_eq!(config.server.port, 9000);
        // blank values are ignored
        assert_eq!(config.upstream.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_env_bad_port_ignored() {
        let vars = env(&[("FABAO_PORT", "http")]);
        let mut config = Config::default();
        config.apply_env(|k| vars.get(k).cloned());
        assert_eq!(config.server.port, DEFAULT_PORT);
    }

    #[test]
    fn test_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_err());

        config.upstream.api_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.upstream.api_url = "ftp://example.com/chat".to_string();
        assert!(config.validate().is_err());

        config.upstream.api_url = "https://example.com/v1/chat/completions".to_string();
        assert!(config.validate().is_ok());

        config.upstream.temperature = 3.5;
        assert!(config.validate().is_err());
    }
}
