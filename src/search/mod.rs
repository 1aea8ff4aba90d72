//! Free-text search parsing
//!
//! A free-text query ("white SUV under 15 lakh with sunroof") is turned into
//! a [`ParsedFilter`] by an out-of-process parser. This module defines that
//! boundary and the [`SearchCoordinator`] that debounces requests and keeps
//! stale responses from overwriting newer state.

pub mod coordinator;
#[cfg(feature = "remote")]
pub mod http;

pub use coordinator::{ParseOutcome, ParseTicket, SearchCoordinator};
#[cfg(feature = "remote")]
pub use http::HttpFreeTextParser;

use crate::core::domain::CatalogDomain;
use crate::core::merge::ParsedFilter;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Shown to the user when a search could not be interpreted
pub const NOTICE_MESSAGE: &str = "Couldn't understand that search";

/// Why a free-text parse produced nothing usable
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("search service unreachable: {0}")]
    Transport(String),

    #[error("search service answered {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("search service returned an unreadable response: {0}")]
    InvalidResponse(String),

    #[error("search service did not answer within {0:?}")]
    Timeout(Duration),
}

/// Translator from free text to partial filter criteria
///
/// The parser owns any I/O, retries and prompt construction. The domain is
/// passed along so an implementation can steer towards values the catalog
/// actually carries; the merge step re-checks regardless.
#[async_trait]
pub trait FreeTextParser: Send + Sync {
    async fn parse(&self, query: &str, domain: &CatalogDomain) -> Result<ParsedFilter, ParseError>;
}

/// Adapter turning a plain function into a [`FreeTextParser`]
pub struct FnParser<F>(pub F);

#[async_trait]
impl<F> FreeTextParser for FnParser<F>
where
    F: Fn(&str, &CatalogDomain) -> Result<ParsedFilter, ParseError> + Send + Sync,
{
    async fn parse(&self, query: &str, domain: &CatalogDomain) -> Result<ParsedFilter, ParseError> {
        (self.0)(query, domain)
    }
}

/// Dismissible, non-blocking message about a failed search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: &'static str,
    pub query: String,
    pub reason: String,
}

impl Notice {
    pub fn parse_failed(query: &str, error: &ParseError) -> Self {
        Self {
            message: NOTICE_MESSAGE,
            query: query.to_string(),
            reason: error.to_string(),
        }
    }
}
