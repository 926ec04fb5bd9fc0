use std::fmt;

use async_trait::async_trait;

use super::types::Dev;

/// Errors that can occur while querying the directory service.
/// Variants carry enough info to tell connectivity failures apart from
/// service-side rejections in the diagnostic log.
#[derive(Debug)]
pub enum DirectoryError {
    /// Provider misconfigured (bad base URL).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The service returned an error status.
    Api { status: u16, message: String },
    /// Failed to parse the service's response body.
    Parse(String),
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryError::Config(msg) => write!(f, "config error: {msg}"),
            DirectoryError::Network(msg) => write!(f, "network error: {msg}"),
            DirectoryError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            DirectoryError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for DirectoryError {}

/// Everything the directory needs to answer one search: the viewport
/// center and the free-text techs filter, passed verbatim.
pub struct SearchQuery<'a> {
    pub latitude: f64,
    pub longitude: f64,
    pub techs: &'a str,
}

#[async_trait]
pub trait DirectoryProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Runs one read-only search and returns the matching devs.
    async fn search(&self, query: SearchQuery<'_>) -> Result<Vec<Dev>, DirectoryError>;
}
