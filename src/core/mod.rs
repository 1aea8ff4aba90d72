//! Core catalog types and the filter → sort → paginate pipeline

pub mod domain;
pub mod error;
pub mod filter;
pub mod merge;
pub mod pipeline;
pub mod query;
pub mod repository;
pub mod sort;
pub mod vehicle;

pub use domain::CatalogDomain;
pub use error::{CatalogError, CatalogResult};
pub use filter::{FilterCriteria, PriceRange};
pub use merge::{MergeReport, ParsedFilter, merge_parsed};
pub use pipeline::{BrowseState, CatalogPage, DEFAULT_PAGE_SIZE, run_query};
pub use query::{PaginatedResponse, PaginationMeta, QueryParams, paginate};
pub use repository::ListingRepository;
pub use sort::{SortOrder, sort_vehicles};
pub use vehicle::{Vehicle, VehicleCategory, VehicleStatus};
