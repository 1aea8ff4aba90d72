//! Listing repository that fetches the catalog from the marketplace API

use crate::core::error::StorageError;
use crate::core::repository::{ListingRepository, ensure_unique_ids};
use crate::core::vehicle::Vehicle;
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

/// `GET {base_url}/api/vehicles` on every load
#[derive(Debug, Clone)]
pub struct HttpListingRepository {
    client: reqwest::Client,
    url: String,
}

impl HttpListingRepository {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: format!("{}/api/vehicles", base_url.trim_end_matches('/')),
        })
    }

    fn unavailable(&self, message: impl ToString) -> StorageError {
        StorageError::Unavailable {
            backend: self.backend().to_string(),
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl ListingRepository for HttpListingRepository {
    async fn load(&self) -> Result<Vec<Vehicle>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.unavailable(e))?;

        if !response.status().is_success() {
            return Err(self
                .unavailable(format!("{} answered {}", self.url, response.status()))
                .into());
        }

        let vehicles: Vec<Vehicle> =
            response.json().await.map_err(|e| StorageError::Malformed {
                backend: self.backend().to_string(),
                message: e.to_string(),
            })?;

        ensure_unique_ids(&vehicles)?;

        tracing::debug!(url = %self.url, count = vehicles.len(), "fetched listing snapshot");
        Ok(vehicles)
    }

    fn backend(&self) -> &'static str {
        "http"
    }
}
