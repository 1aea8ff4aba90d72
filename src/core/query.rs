//! Query parameters and pagination utilities

use crate::core::error::{CatalogError, FieldValidationError, ValidationError};
use crate::core::filter::{FilterCriteria, PriceRange};
use crate::core::sort::SortOrder;
use crate::core::vehicle::VehicleCategory;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Query parameters for browsing the catalog
///
/// This structure is used to extract filter, sort and pagination parameters
/// from URL query strings. Every field is kept as the raw string so that
/// blank values read as absent and malformed numbers surface through
/// [`QueryParams::to_criteria`] with the other field errors.
///
/// # Example
/// ```rust,ignore
/// // In handler:
/// pub async fn list_vehicles(
///     Query(params): Query<QueryParams>,
/// ) -> Json<PaginatedResponse<Vehicle>> {
///     // params.page defaults to 1
///     // params.limit defaults to the configured page size
/// }
///
/// // Usage:
/// GET /vehicles?page=2
/// GET /vehicles?category=Four%20Wheeler&min_price=500000&max_price=1500000
/// GET /vehicles?make=Tata&features=Sunroof,ADAS&sort=PRICE_ASC
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct QueryParams {
    /// Page number (starts at 1)
    pub page: Option<String>,

    /// Number of items per page, the configured page size when absent
    pub limit: Option<String>,

    pub category: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,

    /// Exact year; `0` or `any` means unconstrained
    pub year: Option<String>,

    /// Exact color; `any` means unconstrained
    pub color: Option<String>,

    /// Comma-separated feature names, all of which must be present
    ///
    /// # Example
    /// ```text
    /// features=Sunroof,ADAS
    /// ```
    pub features: Option<String>,

    /// Free-text match on make, model and variant
    pub q: Option<String>,

    /// Sort wire name
    ///
    /// # Example
    /// ```text
    /// sort=PRICE_DESC
    /// sort=RATING_DESC
    /// ```
    pub sort: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn is_any(value: &str) -> bool {
    value == "0" || value.eq_ignore_ascii_case("any")
}

/// Parse an optional numeric field, recording a field error when malformed
fn parse_number<T: FromStr>(
    value: &Option<String>,
    field: &str,
    errors: &mut Vec<FieldValidationError>,
) -> Option<T> {
    let raw = non_blank(value)?;
    match raw.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            errors.push(FieldValidationError {
                field: field.to_string(),
                message: format!("'{}' is not a valid number", raw),
            });
            None
        }
    }
}

impl QueryParams {
    /// Get page number, ensuring minimum of 1
    ///
    /// Blank or malformed values read as page 1; [`QueryParams::to_criteria`]
    /// is what rejects them.
    pub fn page(&self) -> usize {
        non_blank(&self.page)
            .and_then(|p| p.parse::<usize>().ok())
            .unwrap_or(1)
            .max(1)
    }

    /// Get limit, falling back to `default` and never exceeding `max`
    pub fn limit(&self, default: usize, max: usize) -> usize {
        non_blank(&self.limit)
            .and_then(|l| l.parse::<usize>().ok())
            .unwrap_or(default)
            .clamp(1, max.max(1))
    }

    /// Parse the sort name; unknown names fall back to newest first
    pub fn sort_order(&self) -> SortOrder {
        non_blank(&self.sort)
            .map(SortOrder::parse_lenient)
            .unwrap_or_default()
    }

    /// Convert into filter criteria
    ///
    /// Malformed values, paging included, are reported together rather than
    /// one at a time.
    pub fn to_criteria(&self) -> Result<FilterCriteria, CatalogError> {
        let mut errors = Vec::new();
        let mut criteria = FilterCriteria::new();

        parse_number::<usize>(&self.page, "page", &mut errors);
        parse_number::<usize>(&self.limit, "limit", &mut errors);

        if let Some(raw) = non_blank(&self.category) {
            match raw.parse::<VehicleCategory>() {
                Ok(category) => criteria.category = Some(category),
                Err(message) => errors.push(FieldValidationError {
                    field: "category".to_string(),
                    message,
                }),
            }
        }

        criteria.select_make(non_blank(&self.make).map(str::to_string));
        criteria.model = non_blank(&self.model).map(str::to_string);

        let min_price = parse_number::<u64>(&self.min_price, "min_price", &mut errors);
        let max_price = parse_number::<u64>(&self.max_price, "max_price", &mut errors);
        criteria.price = match (min_price, max_price) {
            (Some(min), Some(max)) => PriceRange::new(min, max),
            (Some(min), None) => {
                let mut range = PriceRange::unbounded();
                range.set_min(min);
                range
            }
            (None, Some(max)) => {
                let mut range = PriceRange::unbounded();
                range.set_max(max);
                range
            }
            (None, None) => PriceRange::unbounded(),
        };

        if let Some(raw) = non_blank(&self.year).filter(|y| !is_any(y)) {
            match raw.parse::<u16>() {
                Ok(year) => criteria.year = Some(year),
                Err(_) => errors.push(FieldValidationError {
                    field: "year".to_string(),
                    message: format!("'{}' is not a valid year", raw),
                }),
            }
        }

        criteria.color = non_blank(&self.color)
            .filter(|c| !c.eq_ignore_ascii_case("any"))
            .map(str::to_string);

        if let Some(raw) = non_blank(&self.features) {
            criteria.features = raw
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string)
                .collect();
        }

        criteria.search = non_blank(&self.q).map(str::to_string);

        if errors.is_empty() {
            Ok(criteria)
        } else {
            Err(ValidationError::FieldErrors(errors).into())
        }
    }
}

/// Slice one page out of a sorted result
///
/// Pages are 1-indexed; page 0 is read as page 1. A page past the end yields
/// an empty slice rather than panicking, so callers can clamp afterwards.
pub fn paginate<T>(items: &[T], page: usize, size: usize) -> &[T] {
    let size = size.max(1);
    let start = (page.max(1) - 1).saturating_mul(size).min(items.len());
    let end = start.saturating_add(size).min(items.len());
    &items[start..end]
}

/// Number of pages needed for `total` items
pub fn total_pages(total: usize, size: usize) -> usize {
    if total == 0 { 0 } else { total.div_ceil(size.max(1)) }
}

/// Paginated response structure
///
/// This structure wraps paginated data with metadata about pagination state.
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// The paginated data
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        // Ensure limit is at least 1 to avoid division by zero
        let limit = limit.max(1);
        let page = page.max(1);

        Self {
            page,
            limit,
            total,
            total_pages: total_pages(total, limit),
            has_next: page.saturating_mul(limit) < total,
            has_prev: page > 1,
        }
    }
}
