//! IP-based geolocation over an ip-api style endpoint.
//!
//! One GET to `{base}/json`; the response carries `lat`/`lon` fields among
//! others we ignore. City-level accuracy at best, so the high-accuracy
//! hint cannot be honored.

use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;

use crate::directory::Position;
use crate::location::{LocationError, LocationProvider};

/// Position lookup keyed on the caller's public IP address.
pub struct GeoIpLocationProvider {
    base_url: String,
    consent: bool,
    client: reqwest::Client,
}

#[derive(Deserialize, Debug)]
struct GeoIpResponse {
    lat: f64,
    lon: f64,
}

impl GeoIpLocationProvider {
    /// Creates a new provider. `consent` comes from config: the lookup
    /// sends the caller's address to a third-party service, so it is
    /// opt-in.
    pub fn new(base_url: String, consent: bool) -> Self {
        Self {
            base_url,
            consent,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl LocationProvider for GeoIpLocationProvider {
    fn name(&self) -> &str {
        "geoip"
    }

    async fn request_permission(&self) -> bool {
        self.consent
    }

    async fn current_position(&self, high_accuracy: bool) -> Result<Position, LocationError> {
        if high_accuracy {
            debug!("high-accuracy hint ignored by geoip provider");
        }

        let response = self
            .client
            .get(format!("{}/json", self.base_url))
            .send()
            .await
            .map_err(|e| LocationError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("GeoIP API error: {} - {}", status, err_body);
            return Err(LocationError::Api {
                status,
                message: err_body,
            });
        }

        let body: GeoIpResponse = response
            .json()
            .await
            .map_err(|e| LocationError::Parse(e.to_string()))?;

        Ok(Position {
            latitude: body.lat,
            longitude: body.lon,
        })
    }
}
