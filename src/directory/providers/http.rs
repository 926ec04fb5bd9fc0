//! HTTP implementation of the directory seam.
//!
//! One GET to `/devs` with exactly three query parameters:
//! `latitude`, `longitude`, `techs`. The response is a JSON array of
//! [`DevRecord`]s converted to domain [`Dev`]s on the way out.

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::directory::{Dev, DevRecord, DirectoryError, DirectoryProvider, SearchQuery};

/// Directory service reached over HTTP.
pub struct HttpDirectoryProvider {
    base_url: String,
    client: reqwest::Client,
}

impl HttpDirectoryProvider {
    /// Creates a new provider against the given base URL
    /// (e.g. `http://localhost:3333`).
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl DirectoryProvider for HttpDirectoryProvider {
    fn name(&self) -> &str {
        "http"
    }

    async fn search(&self, query: SearchQuery<'_>) -> Result<Vec<Dev>, DirectoryError> {
        info!(
            "Directory search: latitude={}, longitude={}, techs={:?}",
            query.latitude, query.longitude, query.techs
        );

        let response = self
            .client
            .get(format!("{}/devs", self.base_url))
            .query(&[
                ("latitude", query.latitude.to_string()),
                ("longitude", query.longitude.to_string()),
                ("techs", query.techs.to_string()),
            ])
            .send()
            .await
            .map_err(|e| DirectoryError::Network(e.to_string()))?;

        debug!("Directory response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Directory API error: {} - {}", status, err_body);
            return Err(DirectoryError::Api {
                status,
                message: err_body,
            });
        }

        let records: Vec<DevRecord> = response
            .json()
            .await
            .map_err(|e| DirectoryError::Parse(e.to_string()))?;

        info!("Directory search returned {} dev(s)", records.len());
        Ok(records.into_iter().map(Dev::from).collect())
    }
}
