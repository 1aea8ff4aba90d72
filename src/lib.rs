//! # Vehicle Catalog
//!
//! Catalog query pipeline for a vehicle marketplace.
//!
//! ## Features
//!
//! - **Filtering**: Conjunctive criteria over category, make, model, price range, year, color and features
//! - **Sorting**: Five sort orders, featured listings always first
//! - **Pagination**: 1-indexed fixed-size pages with navigation metadata
//! - **Free-Text Search**: Debounced, latest-wins parsing merged into the current criteria
//! - **Pluggable Storage**: In-memory, JSON file and (with `remote`) HTTP listing repositories
//! - **HTTP Exposure**: axum routes for listings, facets and search
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use catalog::prelude::*;
//!
//! let mut criteria = FilterCriteria::new();
//! criteria.category = Some(VehicleCategory::FourWheeler);
//! criteria.price.set_max(1_500_000);
//!
//! let page = run_query(&snapshot, &criteria, SortOrder::PriceAsc, 1, DEFAULT_PAGE_SIZE);
//! for vehicle in &page.vehicles {
//!     println!("{} ₹{}", vehicle.display_name(), vehicle.price);
//! }
//! ```

pub mod config;
pub mod core;
pub mod search;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Catalog Model ===
    pub use crate::core::{
        domain::CatalogDomain,
        filter::{FilterCriteria, PriceRange},
        sort::{SortOrder, sort_vehicles},
        vehicle::{Vehicle, VehicleCategory, VehicleStatus},
    };

    // === Pipeline ===
    pub use crate::core::{
        merge::{MergeReport, ParsedFilter, merge_parsed},
        pipeline::{BrowseState, CatalogPage, DEFAULT_PAGE_SIZE, EMPTY_STATE_MESSAGE, run_query},
        query::{PaginatedResponse, PaginationMeta, QueryParams, paginate},
    };

    // === Errors ===
    pub use crate::core::error::{
        CatalogError, CatalogResult, ConfigError, StorageError, ValidationError,
    };

    // === Search ===
    pub use crate::search::{
        FnParser, FreeTextParser, Notice, ParseError, ParseOutcome, SearchCoordinator,
    };

    // === Storage ===
    pub use crate::core::repository::ListingRepository;
    pub use crate::storage::{InMemoryListingRepository, JsonFileListingRepository};

    // === Configuration & Server ===
    pub use crate::config::CatalogConfig;
    pub use crate::server::ServerBuilder;

    // === External re-exports ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
}
