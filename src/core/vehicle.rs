//! Vehicle listing records
//!
//! A [`Vehicle`] is an immutable snapshot of one marketplace listing as seen by
//! the query pipeline. Field names follow the camelCase layout used by the web
//! client so persisted snapshots deserialize without translation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Vehicle category, serialized with its display name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VehicleCategory {
    #[serde(rename = "Four Wheeler")]
    FourWheeler,
    #[serde(rename = "Two Wheeler")]
    TwoWheeler,
    #[serde(rename = "Three Wheeler")]
    ThreeWheeler,
    #[serde(rename = "Commercial")]
    Commercial,
    #[serde(rename = "Farm")]
    Farm,
    #[serde(rename = "Construction")]
    Construction,
}

impl VehicleCategory {
    pub const ALL: [VehicleCategory; 6] = [
        VehicleCategory::FourWheeler,
        VehicleCategory::TwoWheeler,
        VehicleCategory::ThreeWheeler,
        VehicleCategory::Commercial,
        VehicleCategory::Farm,
        VehicleCategory::Construction,
    ];

    /// Display name, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleCategory::FourWheeler => "Four Wheeler",
            VehicleCategory::TwoWheeler => "Two Wheeler",
            VehicleCategory::ThreeWheeler => "Three Wheeler",
            VehicleCategory::Commercial => "Commercial",
            VehicleCategory::Farm => "Farm",
            VehicleCategory::Construction => "Construction",
        }
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("unknown vehicle category: {}", s))
    }
}

/// Listing lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    #[default]
    Published,
    Unpublished,
    Sold,
}

/// A single vehicle listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// Unique within a listing store
    pub id: u64,

    pub category: VehicleCategory,
    pub make: String,
    pub model: String,
    #[serde(default)]
    pub variant: String,
    pub year: u16,

    /// Asking price in whole currency units
    pub price: u64,

    /// Odometer reading in kilometres
    #[serde(default)]
    pub mileage: u64,

    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub fuel_type: String,
    #[serde(default)]
    pub transmission: String,

    #[serde(default)]
    pub features: BTreeSet<String>,

    #[serde(default)]
    pub status: VehicleStatus,

    #[serde(default)]
    pub is_featured: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_count: Option<u32>,
}

impl Vehicle {
    /// Create a published, non-featured listing with the identifying fields set
    pub fn new(
        id: u64,
        category: VehicleCategory,
        make: impl Into<String>,
        model: impl Into<String>,
        year: u16,
        price: u64,
    ) -> Self {
        Self {
            id,
            category,
            make: make.into(),
            model: model.into(),
            variant: String::new(),
            year,
            price,
            mileage: 0,
            color: String::new(),
            fuel_type: String::new(),
            transmission: String::new(),
            features: BTreeSet::new(),
            status: VehicleStatus::Published,
            is_featured: false,
            average_rating: None,
            rating_count: None,
        }
    }

    /// "{make} {model} {variant}" without trailing whitespace
    pub fn display_name(&self) -> String {
        let name = format!("{} {} {}", self.make, self.model, self.variant);
        name.trim().to_string()
    }

    /// Average rating, with unrated listings counted as zero
    pub fn effective_rating(&self) -> f64 {
        self.average_rating
            .filter(|r| r.is_finite())
            .unwrap_or(0.0)
    }

    pub fn is_published(&self) -> bool {
        self.status == VehicleStatus::Published
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = variant.into();
        self
    }

    pub fn with_mileage(mut self, mileage: u64) -> Self {
        self.mileage = mileage;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_rating(mut self, average: f64, count: u32) -> Self {
        self.average_rating = Some(average);
        self.rating_count = Some(count);
        self
    }

    pub fn with_status(mut self, status: VehicleStatus) -> Self {
        self.status = status;
        self
    }

    pub fn featured(mut self) -> Self {
        self.is_featured = true;
        self
    }
}
