//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::state::App;
use crate::directory::{Dev, DirectoryError, DirectoryProvider, Position, SearchQuery};
use crate::location::{LocationError, LocationProvider};

/// A directory provider that returns a preset dev list.
#[derive(Default)]
pub struct StaticDirectoryProvider {
    pub devs: Vec<Dev>,
}

#[async_trait]
impl DirectoryProvider for StaticDirectoryProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn search(&self, _query: SearchQuery<'_>) -> Result<Vec<Dev>, DirectoryError> {
        Ok(self.devs.clone())
    }
}

/// A directory provider whose every search fails at the network level.
pub struct FailingDirectoryProvider;

#[async_trait]
impl DirectoryProvider for FailingDirectoryProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn search(&self, _query: SearchQuery<'_>) -> Result<Vec<Dev>, DirectoryError> {
        Err(DirectoryError::Network("connection refused".to_string()))
    }
}

/// A location provider that always denies permission.
pub struct DeniedLocationProvider;

#[async_trait]
impl LocationProvider for DeniedLocationProvider {
    fn name(&self) -> &str {
        "denied"
    }

    async fn request_permission(&self) -> bool {
        false
    }

    async fn current_position(&self, _high_accuracy: bool) -> Result<Position, LocationError> {
        Err(LocationError::Config("permission was denied".to_string()))
    }
}

/// A location provider that grants permission and serves one position.
pub struct GrantedLocationProvider {
    pub position: Position,
}

#[async_trait]
impl LocationProvider for GrantedLocationProvider {
    fn name(&self) -> &str {
        "granted"
    }

    async fn request_permission(&self) -> bool {
        true
    }

    async fn current_position(&self, _high_accuracy: bool) -> Result<Position, LocationError> {
        Ok(self.position)
    }
}

/// Creates a test App with a StaticDirectoryProvider.
pub fn test_app() -> App {
    App::new(Arc::new(StaticDirectoryProvider::default()))
}

/// Builds a dev with placeholder profile fields at the given coordinates.
pub fn sample_dev(id: &str, latitude: f64, longitude: f64) -> Dev {
    Dev {
        id: id.to_string(),
        name: format!("Dev {id}"),
        bio: None,
        techs: vec!["rust".to_string()],
        avatar_url: format!("https://example.com/{id}.png"),
        github_username: id.to_string(),
        latitude,
        longitude,
    }
}
