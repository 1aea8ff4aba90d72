//! Debounced, sequenced free-text parsing
//!
//! Every query gets a monotonically increasing sequence number when it is
//! issued. A response is only accepted while its sequence number is still the
//! latest one issued; anything older is discarded, whether it is still waiting
//! out the debounce or already came back from the parser.

use super::{FreeTextParser, Notice, ParseError};
use crate::config::CatalogConfig;
use crate::core::domain::CatalogDomain;
use crate::core::merge::{MergeReport, ParsedFilter, merge_parsed};
use crate::core::pipeline::BrowseState;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// A query tagged with the sequence number it was issued under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTicket {
    seq: u64,
    query: String,
}

impl ParseTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Result of resolving one ticket
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// The parser answered and the ticket was still current
    Parsed { seq: u64, filter: ParsedFilter },

    /// A newer query was issued; this one must not touch state
    Superseded,

    /// The parser failed or timed out; state stays as it was
    Failed(Notice),
}

pub struct SearchCoordinator {
    parser: Arc<dyn FreeTextParser>,
    debounce: Duration,
    timeout: Duration,
    latest: AtomicU64,
}

impl SearchCoordinator {
    pub fn new(parser: Arc<dyn FreeTextParser>) -> Self {
        let defaults = CatalogConfig::default();
        Self::from_config(parser, &defaults)
    }

    pub fn from_config(parser: Arc<dyn FreeTextParser>, config: &CatalogConfig) -> Self {
        Self {
            parser,
            debounce: config.debounce(),
            timeout: config.parse_timeout(),
            latest: AtomicU64::new(0),
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Issue a new query, superseding every earlier ticket
    pub fn begin(&self, query: impl Into<String>) -> ParseTicket {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        ParseTicket {
            seq,
            query: query.into(),
        }
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == seq
    }

    /// Wait out the debounce, then parse if the ticket is still current
    pub async fn resolve(&self, ticket: &ParseTicket, domain: &CatalogDomain) -> ParseOutcome {
        if !self.debounce.is_zero() {
            tokio::time::sleep(self.debounce).await;
        }

        if !self.is_latest(ticket.seq) {
            tracing::debug!(seq = ticket.seq, "search superseded before dispatch");
            return ParseOutcome::Superseded;
        }

        let query = ticket.query.trim();
        if query.is_empty() {
            return ParseOutcome::Parsed {
                seq: ticket.seq,
                filter: ParsedFilter::default(),
            };
        }

        let result = self.call_parser(query, domain).await;

        if !self.is_latest(ticket.seq) {
            tracing::debug!(seq = ticket.seq, "discarding stale search response");
            return ParseOutcome::Superseded;
        }

        match result {
            Ok(filter) => ParseOutcome::Parsed {
                seq: ticket.seq,
                filter,
            },
            Err(error) => {
                tracing::warn!(seq = ticket.seq, query, error = %error, "free-text search failed");
                ParseOutcome::Failed(Notice::parse_failed(query, &error))
            }
        }
    }

    /// Parse one query without debounce or sequencing
    ///
    /// For stateless request/response callers, where each request owns its
    /// own filter state and there is no newer query to lose to.
    pub async fn parse_once(&self, query: &str, domain: &CatalogDomain) -> Result<ParsedFilter, Notice> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(ParsedFilter::default());
        }

        self.call_parser(query, domain).await.map_err(|error| {
            tracing::warn!(query, error = %error, "free-text search failed");
            Notice::parse_failed(query, &error)
        })
    }

    async fn call_parser(&self, query: &str, domain: &CatalogDomain) -> Result<ParsedFilter, ParseError> {
        match tokio::time::timeout(self.timeout, self.parser.parse(query, domain)).await {
            Ok(result) => result,
            Err(_) => Err(ParseError::Timeout(self.timeout)),
        }
    }

    /// Issue and resolve in one step
    pub async fn submit(&self, query: impl Into<String>, domain: &CatalogDomain) -> ParseOutcome {
        let ticket = self.begin(query);
        self.resolve(&ticket, domain).await
    }

    /// Merge a successful outcome into the browse state
    ///
    /// Returns `None`, leaving the state untouched, for failures and for
    /// outcomes overtaken by a newer query since they resolved.
    pub fn apply(
        &self,
        outcome: ParseOutcome,
        state: &mut BrowseState,
        domain: &CatalogDomain,
    ) -> Option<MergeReport> {
        match outcome {
            ParseOutcome::Parsed { seq, filter } if self.is_latest(seq) => {
                Some(state.update_criteria(|criteria| merge_parsed(criteria, filter, domain)))
            }
            _ => None,
        }
    }
}
