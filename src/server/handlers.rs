//! HTTP handlers for catalog browsing and free-text search
//!
//! Every request loads a fresh snapshot from the repository and recomputes the
//! pipeline from it. Nothing derived from a snapshot outlives the request.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::CatalogConfig;
use crate::core::domain::CatalogDomain;
use crate::core::error::{CatalogError, CatalogResult};
use crate::core::filter::FilterCriteria;
use crate::core::merge::{MergeReport, merge_parsed};
use crate::core::pipeline::run_query;
use crate::core::query::{PaginatedResponse, QueryParams};
use crate::core::repository::{ListingRepository, ensure_unique_ids};
use crate::core::sort::SortOrder;
use crate::core::vehicle::Vehicle;
use crate::search::{Notice, SearchCoordinator};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn ListingRepository>,
    pub search: Option<Arc<SearchCoordinator>>,
    pub config: Arc<CatalogConfig>,
}

impl AppState {
    async fn snapshot(&self) -> CatalogResult<Vec<Vehicle>> {
        let vehicles = self.repository.load().await?;
        ensure_unique_ids(&vehicles)?;
        tracing::debug!(
            backend = self.repository.backend(),
            count = vehicles.len(),
            "loaded listing snapshot"
        );
        Ok(vehicles)
    }
}

/// Response for the vehicle listing endpoint
#[derive(Debug, Serialize)]
pub struct VehicleListResponse {
    #[serde(flatten)]
    pub page: PaginatedResponse<Vehicle>,
    pub sort: SortOrder,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<&'static str>,
}

/// GET /vehicles
pub async fn list_vehicles(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> CatalogResult<Json<VehicleListResponse>> {
    let criteria = params.to_criteria()?;
    let sort = params.sort_order();
    let limit = params.limit(state.config.page_size, state.config.max_page_size);

    let snapshot = state.snapshot().await?;
    let page = run_query(&snapshot, &criteria, sort, params.page(), limit);

    tracing::debug!(
        total = page.pagination.total,
        page = page.pagination.page,
        sort = %sort,
        "catalog query"
    );

    let pagination = page.pagination.clone();
    let empty_state = page.empty_state;
    Ok(Json(VehicleListResponse {
        page: PaginatedResponse {
            data: page.into_owned(),
            pagination,
        },
        sort,
        empty_state,
    }))
}

/// One entry of the sort dropdown
#[derive(Debug, Serialize)]
pub struct SortOption {
    pub value: SortOrder,
    pub label: &'static str,
}

/// Response for the facets endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetsResponse {
    #[serde(flatten)]
    pub domain: CatalogDomain,
    pub sort_options: Vec<SortOption>,
    pub default_sort: SortOrder,
}

/// GET /vehicles/facets
///
/// Values the filter panel offers, derived from published listings only.
pub async fn list_facets(State(state): State<AppState>) -> CatalogResult<Json<FacetsResponse>> {
    let snapshot = state.snapshot().await?;

    Ok(Json(FacetsResponse {
        domain: CatalogDomain::from_snapshot(&snapshot),
        sort_options: SortOrder::ALL
            .iter()
            .map(|&order| SortOption {
                value: order,
                label: order.label(),
            })
            .collect(),
        default_sort: SortOrder::default(),
    }))
}

/// Body of a free-text search request
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    /// Criteria currently selected in the view; merged into, never discarded
    #[serde(default)]
    pub criteria: FilterCriteria,
}

/// Result of a free-text search
///
/// Exactly one of `report` and `notice` is present. On a notice the returned
/// criteria equal the ones sent.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub criteria: FilterCriteria,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<MergeReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

/// POST /search
pub async fn search(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> CatalogResult<Json<SearchResponse>> {
    let Json(request) = payload?;
    let coordinator = state.search.clone().ok_or(CatalogError::SearchUnavailable)?;

    let snapshot = state.snapshot().await?;
    let domain = CatalogDomain::from_snapshot(&snapshot);

    let mut criteria = request.criteria;
    let response = match coordinator.parse_once(&request.query, &domain).await {
        Ok(parsed) => {
            let report = merge_parsed(&mut criteria, parsed, &domain);
            tracing::info!(
                query = %request.query,
                applied = ?report.applied,
                dropped = report.dropped.len(),
                "free-text search merged"
            );
            SearchResponse {
                criteria,
                report: Some(report),
                notice: None,
            }
        }
        Err(notice) => SearchResponse {
            criteria,
            report: None,
            notice: Some(notice),
        },
    };

    Ok(Json(response))
}
