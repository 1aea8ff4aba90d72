//! Shared contract tests for listing repository backends
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod repository_harness;
//!
//! listing_repository_tests!(|vehicles| (MyRepository::seeded(vehicles), guard));
//! ```
//!
//! The seed expression receives the listings to store and returns the
//! repository together with anything that must outlive it (a temp dir, `()`).

#![allow(dead_code)]

use catalog::prelude::*;

/// A small catalog touching every field the pipeline reads
pub fn seed() -> Vec<Vehicle> {
    vec![
        Vehicle::new(11, VehicleCategory::FourWheeler, "Tata", "Nexon", 2023, 950_000)
            .with_variant("XZ+")
            .with_mileage(12_000)
            .with_color("White")
            .with_features(["Sunroof", "ABS"])
            .with_rating(4.5, 32)
            .featured(),
        Vehicle::new(12, VehicleCategory::FourWheeler, "Hyundai", "Creta", 2021, 1_250_000)
            .with_mileage(35_000)
            .with_color("Grey")
            .with_features(["ABS"]),
        Vehicle::new(13, VehicleCategory::TwoWheeler, "TVS", "Raider", 2022, 95_000)
            .with_mileage(3_000)
            .with_status(VehicleStatus::Unpublished),
        Vehicle::new(14, VehicleCategory::TwoWheeler, "Honda", "Activa 6G", 2020, 68_000)
            .with_status(VehicleStatus::Sold),
    ]
}

#[macro_export]
macro_rules! listing_repository_tests {
    ($seed:expr) => {
        mod listing_repository_contract_tests {
            use super::*;
            use catalog::prelude::*;

            #[tokio::test]
            async fn test_load_returns_every_listing_in_order() {
                let (repo, _guard) = ($seed)(super::repository_harness::seed());

                let loaded = repo.load().await.unwrap();
                let ids: Vec<u64> = loaded.iter().map(|v| v.id).collect();
                assert_eq!(ids, vec![11, 12, 13, 14]);
            }

            #[tokio::test]
            async fn test_load_preserves_fields() {
                let (repo, _guard) = ($seed)(super::repository_harness::seed());

                let loaded = repo.load().await.unwrap();
                assert_eq!(loaded, super::repository_harness::seed());
            }

            #[tokio::test]
            async fn test_load_keeps_unpublished_listings() {
                let (repo, _guard) = ($seed)(super::repository_harness::seed());

                let loaded = repo.load().await.unwrap();
                assert_eq!(loaded.iter().filter(|v| !v.is_published()).count(), 2);
            }

            #[tokio::test]
            async fn test_empty_store_loads_empty() {
                let (repo, _guard) = ($seed)(Vec::new());

                assert!(repo.load().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_repeated_loads_are_identical() {
                let (repo, _guard) = ($seed)(super::repository_harness::seed());

                let first = repo.load().await.unwrap();
                let second = repo.load().await.unwrap();
                assert_eq!(first, second);
            }

            #[tokio::test]
            async fn test_pipeline_over_loaded_snapshot() {
                let (repo, _guard) = ($seed)(super::repository_harness::seed());
                let snapshot = repo.load().await.unwrap();

                let page = run_query(
                    &snapshot,
                    &FilterCriteria::new(),
                    SortOrder::PriceAsc,
                    1,
                    DEFAULT_PAGE_SIZE,
                );
                let ids: Vec<u64> = page.vehicles.iter().map(|v| v.id).collect();
                assert_eq!(ids, vec![11, 12]);
            }

            #[tokio::test]
            async fn test_backend_is_named() {
                let (repo, _guard) = ($seed)(Vec::new());

                assert!(!repo.backend().is_empty());
            }
        }
    };
}
