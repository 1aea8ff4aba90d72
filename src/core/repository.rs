//! Repository trait for loading listing snapshots

use crate::core::error::StorageError;
use crate::core::vehicle::Vehicle;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;

/// Source of the listing store
///
/// Implementations hide where listings live (memory, a persisted file, a
/// REST endpoint). The pipeline only ever asks for a full snapshot.
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Load every listing currently in the store
    async fn load(&self) -> Result<Vec<Vehicle>>;

    /// Short backend name used in logs and errors
    fn backend(&self) -> &'static str;
}

/// Reject snapshots in which two listings share an id
pub fn ensure_unique_ids(vehicles: &[Vehicle]) -> Result<(), StorageError> {
    let mut seen = HashSet::with_capacity(vehicles.len());
    match vehicles.iter().find(|v| !seen.insert(v.id)) {
        Some(duplicate) => Err(StorageError::DuplicateId { id: duplicate.id }),
        None => Ok(()),
    }
}
