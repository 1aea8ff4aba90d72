//! Filter → sort → paginate over a listing snapshot
//!
//! Every call recomputes from scratch; there is no cache between calls and the
//! snapshot is only ever borrowed.

use crate::core::filter::FilterCriteria;
use crate::core::query::{PaginationMeta, paginate, total_pages};
use crate::core::sort::{SortOrder, sort_vehicles};
use crate::core::vehicle::Vehicle;
use serde::{Deserialize, Serialize};

/// Page size used by the marketplace listing grid
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// Message rendered when the filtered result is empty
pub const EMPTY_STATE_MESSAGE: &str =
    "No vehicles match your filters. Try adjusting your filters to find your perfect vehicle.";

/// One rendered page of the catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogPage<'a> {
    pub vehicles: Vec<&'a Vehicle>,
    pub pagination: PaginationMeta,
    pub sort: SortOrder,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<&'static str>,
}

impl CatalogPage<'_> {
    pub fn is_empty(&self) -> bool {
        self.pagination.total == 0
    }

    /// Detach the page from the snapshot it borrows
    pub fn into_owned(self) -> Vec<Vehicle> {
        self.vehicles.into_iter().cloned().collect()
    }
}

/// Run the full pipeline for one page
pub fn run_query<'a>(
    snapshot: &'a [Vehicle],
    criteria: &FilterCriteria,
    sort: SortOrder,
    page: usize,
    page_size: usize,
) -> CatalogPage<'a> {
    let mut matched = criteria.apply(snapshot);
    sort_vehicles(&mut matched, sort);

    let pagination = PaginationMeta::new(page, page_size, matched.len());
    let vehicles = paginate(&matched, pagination.page, pagination.limit).to_vec();

    CatalogPage {
        vehicles,
        empty_state: (pagination.total == 0).then_some(EMPTY_STATE_MESSAGE),
        pagination,
        sort,
    }
}

/// The single filter/sort/page state object owned by a browsing view
///
/// Criteria are only reachable through [`BrowseState::update_criteria`] and
/// the helpers built on it, so any filter change sends the view back to the
/// first page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowseState {
    criteria: FilterCriteria,
    sort: SortOrder,
    page: usize,
    page_size: usize,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl BrowseState {
    pub fn new(page_size: usize) -> Self {
        Self {
            criteria: FilterCriteria::default(),
            sort: SortOrder::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Mutate the criteria; the page resets to 1 when anything changed
    pub fn update_criteria<R>(&mut self, f: impl FnOnce(&mut FilterCriteria) -> R) -> R {
        let before = self.criteria.clone();
        let result = f(&mut self.criteria);
        if self.criteria != before {
            self.page = 1;
        }
        result
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.update_criteria(|current| *current = criteria);
    }

    /// Change the ordering; the page resets to 1 when it differs
    pub fn set_sort(&mut self, sort: SortOrder) {
        if self.sort != sort {
            self.sort = sort;
            self.page = 1;
        }
    }

    /// Move to `page`, clamped to `[1, last page]` for `total` results
    pub fn set_page(&mut self, page: usize, total: usize) {
        let last = total_pages(total, self.page_size).max(1);
        self.page = page.clamp(1, last);
    }

    /// Pull the page back into range after the result set shrank
    pub fn clamp_page(&mut self, total: usize) {
        self.set_page(self.page, total);
    }

    /// Clear all filters, restore newest-first and go back to page 1
    pub fn reset(&mut self) {
        *self = Self::new(self.page_size);
    }

    /// Run the pipeline for the current state, clamping the page first
    pub fn query<'a>(&mut self, snapshot: &'a [Vehicle]) -> CatalogPage<'a> {
        let total = self.criteria.apply(snapshot).len();
        self.clamp_page(total);
        run_query(snapshot, &self.criteria, self.sort, self.page, self.page_size)
    }
}
