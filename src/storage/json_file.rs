//! Listing repository backed by a persisted JSON snapshot

use crate::core::error::StorageError;
use crate::core::repository::{ListingRepository, ensure_unique_ids};
use crate::core::vehicle::Vehicle;
use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Reads a JSON array of vehicles from disk on every load
///
/// The file has the same layout the web client persists in browser storage.
#[derive(Debug, Clone)]
pub struct JsonFileListingRepository {
    path: PathBuf,
}

impl JsonFileListingRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ListingRepository for JsonFileListingRepository {
    async fn load(&self) -> Result<Vec<Vehicle>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| StorageError::Unavailable {
                backend: self.backend().to_string(),
                message: format!("{}: {}", self.path.display(), e),
            })?;

        let vehicles: Vec<Vehicle> =
            serde_json::from_str(&content).map_err(|e| StorageError::Malformed {
                backend: self.backend().to_string(),
                message: format!("{}: {}", self.path.display(), e),
            })?;

        ensure_unique_ids(&vehicles)?;

        tracing::debug!(
            path = %self.path.display(),
            count = vehicles.len(),
            "loaded listing snapshot"
        );
        Ok(vehicles)
    }

    fn backend(&self) -> &'static str {
        "json-file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 1, "category": "Four Wheeler", "make": "Honda", "model": "City",
                 "year": 2021, "price": 1050000, "isFeatured": true}}]"#
        )
        .unwrap();

        let repo = JsonFileListingRepository::new(file.path());
        let vehicles = repo.load().await.unwrap();

        assert_eq!(vehicles.len(), 1);
        assert!(vehicles[0].is_featured);
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileListingRepository::new(dir.path().join("vehicles.json"));

        let err = repo.load().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StorageError>(),
            Some(StorageError::Unavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_garbage_is_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not a list").unwrap();

        let repo = JsonFileListingRepository::new(file.path());
        let err = repo.load().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StorageError>(),
            Some(StorageError::Malformed { .. })
        ));
    }
}
