//! In-memory listing repository for testing and development

use crate::core::repository::{ListingRepository, ensure_unique_ids};
use crate::core::vehicle::Vehicle;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// In-memory listing store
///
/// Useful for testing and development. Uses RwLock for thread-safe access;
/// clones share the same underlying store.
#[derive(Clone, Default)]
pub struct InMemoryListingRepository {
    vehicles: Arc<RwLock<Vec<Vehicle>>>,
}

impl InMemoryListingRepository {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `vehicles`
    pub fn with_vehicles(vehicles: Vec<Vehicle>) -> Result<Self> {
        ensure_unique_ids(&vehicles)?;
        Ok(Self {
            vehicles: Arc::new(RwLock::new(vehicles)),
        })
    }

    /// Swap the whole snapshot, as a reload from the backing store would
    pub fn replace(&self, vehicles: Vec<Vehicle>) -> Result<()> {
        ensure_unique_ids(&vehicles)?;
        let mut store = self
            .vehicles
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        *store = vehicles;
        Ok(())
    }

    /// Insert a listing or overwrite the one with the same id
    pub fn upsert(&self, vehicle: Vehicle) -> Result<()> {
        let mut store = self
            .vehicles
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        match store.iter_mut().find(|v| v.id == vehicle.id) {
            Some(existing) => *existing = vehicle,
            None => store.push(vehicle),
        }
        Ok(())
    }

    /// Remove a listing, returning whether it existed
    pub fn remove(&self, id: u64) -> Result<bool> {
        let mut store = self
            .vehicles
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let before = store.len();
        store.retain(|v| v.id != id);
        Ok(store.len() != before)
    }
}

#[async_trait]
impl ListingRepository for InMemoryListingRepository {
    async fn load(&self) -> Result<Vec<Vehicle>> {
        let store = self
            .vehicles
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(store.clone())
    }

    fn backend(&self) -> &'static str {
        "in-memory"
    }
}
