//! Error types for fabao

use thiserror::Error;

/// Result type alias using fabao's Error
pub type Result<T> = std::result::Result<T, Error>;

/// fabao error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Network failure, non-success status or an `error` member in the reply
    #[error("Upstream request failed: {message}")]
    UpstreamError { message: String },

    #[error("Upstream request timed out: {message}")]
    UpstreamTimeout { message: String },

    /// Reply was not JSON or lacked `choices[0].message.content`
    #[error("Invalid upstream response: {message}")]
    UpstreamFormat { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// True for failures caused by the model service rather than by us
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Error::UpstreamError { .. } | Error::UpstreamTimeout { .. } | Error::UpstreamFormat { .. }
        )
    }

    /// Short reason without the variant prefix, as shown to API callers
    pub fn reason(&self) -> String {
        match self {
            Error::ConfigError { message }
            | Error::InvalidRequest { message }
            | Error::UpstreamError { message }
            | Error::UpstreamTimeout { message }
            | Error::UpstreamFormat { message } => message.clone(),
            other => other.to_string(),
        }
    }
}
