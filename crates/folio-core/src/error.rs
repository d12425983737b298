use thiserror::Error;

/// Everything that can go wrong while building the projects section.
///
/// Only the first two variants come out of a fetch, and the page handles
/// them identically: fall back to the cache, or show the error indicator.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Upstream error: HTTP {status}")]
    Upstream { status: u16 },

    #[error("Network or parse error: {0}")]
    TransportOrDecode(String),

    #[error("Cache operation failed: {0}")]
    CacheError(#[from] folio_cache::CacheError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// Short machine-readable reason for a failed fetch
    pub fn reason(&self) -> &'static str {
        match self {
            Error::Upstream { .. } => "upstream-error",
            Error::TransportOrDecode(_) => "network-or-parse-error",
            Error::CacheError(_) => "cache-error",
            Error::ConfigError(_) => "config-error",
            Error::IoError(_) => "io-error",
        }
    }
}

impl From<folio_api::GitHubError> for Error {
    fn from(err: folio_api::GitHubError) -> Self {
        match err {
            folio_api::GitHubError::Upstream { status } => Error::Upstream { status },
            other => Error::TransportOrDecode(other.to_string()),
        }
    }
}
