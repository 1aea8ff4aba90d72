//! Known filter values derived from a listing snapshot
//!
//! The domain is what the catalog currently offers: the makes, models,
//! features and colors a user can actually select. It feeds the facet lists
//! and bounds what a parsed free-text query may set.

use crate::core::vehicle::{Vehicle, VehicleCategory};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDomain {
    pub categories: BTreeSet<VehicleCategory>,

    /// Models offered under each make, both sorted
    pub models_by_make: BTreeMap<String, BTreeSet<String>>,

    pub features: BTreeSet<String>,
    pub colors: BTreeSet<String>,

    /// Newest first
    pub years: Vec<u16>,

    /// Cheapest and most expensive listing, when any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_bounds: Option<(u64, u64)>,
}

impl CatalogDomain {
    /// Collect the domain from the published listings of a snapshot
    pub fn from_snapshot(vehicles: &[Vehicle]) -> Self {
        let mut domain = Self::default();
        let mut years = BTreeSet::new();

        for vehicle in vehicles.iter().filter(|v| v.is_published()) {
            domain.categories.insert(vehicle.category);
            domain
                .models_by_make
                .entry(vehicle.make.clone())
                .or_default()
                .insert(vehicle.model.clone());
            domain.features.extend(vehicle.features.iter().cloned());
            if !vehicle.color.is_empty() {
                domain.colors.insert(vehicle.color.clone());
            }
            years.insert(vehicle.year);
            domain.price_bounds = Some(match domain.price_bounds {
                Some((lo, hi)) => (lo.min(vehicle.price), hi.max(vehicle.price)),
                None => (vehicle.price, vehicle.price),
            });
        }

        domain.years = years.into_iter().rev().collect();
        domain
    }

    pub fn makes(&self) -> impl Iterator<Item = &str> {
        self.models_by_make.keys().map(String::as_str)
    }

    pub fn models_for(&self, make: &str) -> impl Iterator<Item = &str> {
        self.models_by_make
            .get(make)
            .into_iter()
            .flat_map(|models| models.iter().map(String::as_str))
    }

    /// Catalog spelling of a make, matched case-insensitively
    pub fn canonical_make(&self, make: &str) -> Option<&str> {
        find_ignore_case(self.models_by_make.keys(), make)
    }

    /// Catalog spelling of a model offered under `make`
    pub fn canonical_model(&self, make: &str, model: &str) -> Option<&str> {
        find_ignore_case(self.models_by_make.get(make)?, model)
    }

    /// The make offering `model`, when exactly one make does
    pub fn make_for_model(&self, model: &str) -> Option<&str> {
        let mut owners = self
            .models_by_make
            .iter()
            .filter(|(_, models)| find_ignore_case(models.iter(), model).is_some())
            .map(|(make, _)| make.as_str());

        match (owners.next(), owners.next()) {
            (Some(make), None) => Some(make),
            _ => None,
        }
    }

    pub fn canonical_feature(&self, feature: &str) -> Option<&str> {
        find_ignore_case(&self.features, feature)
    }

    pub fn is_empty(&self) -> bool {
        self.models_by_make.is_empty()
    }
}

fn find_ignore_case<'a, I>(values: I, needle: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a String>,
{
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    values
        .into_iter()
        .find(|v| v.to_lowercase() == needle)
        .map(String::as_str)
}
