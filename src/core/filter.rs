//! Filter criteria and predicate construction
//!
//! Every constraint in [`FilterCriteria`] is independent and optional. The
//! predicate built from it is the conjunction of the active constraints;
//! absent constraints are vacuously true.

use crate::core::vehicle::{Vehicle, VehicleCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Inclusive price bounds
///
/// The bounds are kept ordered at input time: the setters clamp so that
/// `min <= max` always holds, and the predicate never has to reconcile a
/// crossed range.
///
/// Deserialized ranges are ordered the same way `new` orders them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPriceRange")]
pub struct PriceRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<u64>,
}

/// Wire form of [`PriceRange`], possibly crossed
#[derive(Deserialize)]
struct RawPriceRange {
    #[serde(default)]
    min: Option<u64>,
    #[serde(default)]
    max: Option<u64>,
}

impl From<RawPriceRange> for PriceRange {
    fn from(raw: RawPriceRange) -> Self {
        match (raw.min, raw.max) {
            (Some(min), Some(max)) => Self::new(min, max),
            (min, max) => Self { min, max },
        }
    }
}

impl PriceRange {
    /// Build a bounded range, swapping crossed bounds
    pub fn new(a: u64, b: u64) -> Self {
        Self {
            min: Some(a.min(b)),
            max: Some(a.max(b)),
        }
    }

    /// No lower or upper bound
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn min(&self) -> Option<u64> {
        self.min
    }

    pub fn max(&self) -> Option<u64> {
        self.max
    }

    /// Move the lower bound; dragging it past the upper bound pulls the
    /// upper bound along to the same value
    pub fn set_min(&mut self, value: u64) {
        if self.max.is_some_and(|max| value > max) {
            self.max = Some(value);
        }
        self.min = Some(value);
    }

    /// Move the upper bound; dragging it below the lower bound pulls the
    /// lower bound along to the same value
    pub fn set_max(&mut self, value: u64) {
        if self.min.is_some_and(|min| value < min) {
            self.min = Some(value);
        }
        self.max = Some(value);
    }

    pub fn clear_min(&mut self) {
        self.min = None;
    }

    pub fn clear_max(&mut self) {
        self.max = None;
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, price: u64) -> bool {
        self.min.is_none_or(|min| price >= min) && self.max.is_none_or(|max| price <= max)
    }
}

/// The conjunctive set of user-selected constraints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<VehicleCategory>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,

    /// Only meaningful together with `make`; see [`FilterCriteria::select_make`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    pub price: PriceRange,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Every selected feature must be present on the vehicle
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub features: BTreeSet<String>,

    /// Case-insensitive substring match on "make model variant"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// Unpublished and sold listings are hidden unless this is set
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub include_unpublished: bool,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Change the make, clearing the model when the make actually changes
    pub fn select_make(&mut self, make: Option<String>) {
        if self.make != make {
            self.model = None;
        }
        self.make = make;
    }

    /// True when no constraint is active
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.make.is_none()
            && self.model.is_none()
            && self.price.is_unbounded()
            && self.year.is_none()
            && self.color.is_none()
            && self.features.is_empty()
            && self.search.as_deref().is_none_or(|s| s.trim().is_empty())
    }

    /// Evaluate every active constraint against one vehicle
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        self.predicate()(vehicle)
    }

    /// Build the conjunction of all active constraints
    ///
    /// The search needle is lowercased once here rather than per vehicle.
    pub fn predicate(&self) -> impl Fn(&Vehicle) -> bool + '_ {
        let needle = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        move |vehicle: &Vehicle| {
            (self.include_unpublished || vehicle.is_published())
                && self.category.is_none_or(|c| vehicle.category == c)
                && self.make.as_deref().is_none_or(|m| vehicle.make == m)
                && self.model.as_deref().is_none_or(|m| vehicle.model == m)
                && self.price.contains(vehicle.price)
                && self.year.is_none_or(|y| vehicle.year == y)
                && self.color.as_deref().is_none_or(|c| vehicle.color == c)
                && self.features.is_subset(&vehicle.features)
                && needle
                    .as_deref()
                    .is_none_or(|n| vehicle.display_name().to_lowercase().contains(n))
        }
    }

    /// Filter a snapshot without mutating it
    pub fn apply<'a>(&self, vehicles: &'a [Vehicle]) -> Vec<&'a Vehicle> {
        let predicate = self.predicate();
        vehicles.iter().filter(|v| predicate(v)).collect()
    }
}
