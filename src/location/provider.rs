use std::fmt;

use async_trait::async_trait;

use crate::directory::Position;

/// Errors that can occur during a position read.
#[derive(Debug)]
pub enum LocationError {
    /// Provider misconfigured (missing coordinates, bad URL).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The lookup service returned an error status.
    Api { status: u16, message: String },
    /// Failed to parse the lookup service's response.
    Parse(String),
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationError::Config(msg) => write!(f, "config error: {msg}"),
            LocationError::Network(msg) => write!(f, "network error: {msg}"),
            LocationError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            LocationError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for LocationError {}

/// The geolocation capability consumed by the bootstrap step.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Asks for the location capability. Denied means the caller must not
    /// attempt a position read.
    async fn request_permission(&self) -> bool;

    /// One-shot position read. `high_accuracy` is a hint; providers that
    /// cannot honor it return their best available fix.
    async fn current_position(&self, high_accuracy: bool) -> Result<Position, LocationError>;
}
