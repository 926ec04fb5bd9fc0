//! Config-backed position. Stands in for a device fix on hosts without a
//! geolocation service.

use async_trait::async_trait;

use crate::directory::Position;
use crate::location::{LocationError, LocationProvider};

/// Serves a fixed position from configuration. Permission is granted iff
/// both coordinates are configured.
pub struct FixedLocationProvider {
    position: Option<Position>,
}

impl FixedLocationProvider {
    pub fn new(latitude: Option<f64>, longitude: Option<f64>) -> Self {
        let position = match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(Position {
                latitude,
                longitude,
            }),
            _ => None,
        };
        Self { position }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn request_permission(&self) -> bool {
        self.position.is_some()
    }

    async fn current_position(&self, _high_accuracy: bool) -> Result<Position, LocationError> {
        self.position
            .ok_or_else(|| LocationError::Config("no coordinates configured".to_string()))
    }
}
