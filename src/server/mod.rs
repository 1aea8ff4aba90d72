//! HTTP exposure of the catalog pipeline
//!
//! [`ServerBuilder`] wires a listing repository and an optional free-text
//! parser into an axum `Router` with health, listing, facet and search routes.

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
