//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::AppState;
use super::router::{build_catalog_routes, health_routes};
use crate::config::CatalogConfig;
use crate::core::repository::ListingRepository;
use crate::search::{FreeTextParser, SearchCoordinator};
use crate::storage::JsonFileListingRepository;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for the catalog HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_repository(InMemoryListingRepository::with_vehicles(vehicles)?)
///     .with_parser(my_parser)
///     .build()?;
/// ```
pub struct ServerBuilder {
    repository: Option<Arc<dyn ListingRepository>>,
    parser: Option<Arc<dyn FreeTextParser>>,
    config: CatalogConfig,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with default configuration
    pub fn new() -> Self {
        Self {
            repository: None,
            parser: None,
            config: CatalogConfig::default(),
            custom_routes: Vec::new(),
        }
    }

    /// Create a builder whose repository and parser come from configuration
    ///
    /// `listings_file` wins over `listings_url`. The HTTP-backed repository and
    /// parser need the `remote` feature; without it their URLs are ignored
    /// with a warning.
    pub fn from_config(config: CatalogConfig) -> Result<Self> {
        config.validate()?;
        let mut builder = Self::new();

        if let Some(path) = &config.listings_file {
            builder = builder.with_repository(JsonFileListingRepository::new(path));
        }

        #[cfg(feature = "remote")]
        {
            use crate::search::HttpFreeTextParser;
            use crate::storage::HttpListingRepository;

            if builder.repository.is_none() {
                if let Some(url) = &config.listings_url {
                    builder = builder
                        .with_repository(HttpListingRepository::new(url, config.parse_timeout())?);
                }
            }
            if let Some(url) = &config.ai_proxy_url {
                builder = builder
                    .with_parser(HttpFreeTextParser::new(url.as_str(), config.parse_timeout())?);
            }
        }

        #[cfg(not(feature = "remote"))]
        {
            if config.listings_url.is_some() || config.ai_proxy_url.is_some() {
                tracing::warn!("remote URLs configured without the `remote` feature; ignoring them");
            }
        }

        Ok(builder.with_config(config))
    }

    /// Set the listing repository (required)
    pub fn with_repository(mut self, repository: impl ListingRepository + 'static) -> Self {
        self.repository = Some(Arc::new(repository));
        self
    }

    /// Set an already shared listing repository
    pub fn with_shared_repository(mut self, repository: Arc<dyn ListingRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Enable free-text search with the given parser
    pub fn with_parser(mut self, parser: impl FreeTextParser + 'static) -> Self {
        self.parser = Some(Arc::new(parser));
        self
    }

    pub fn with_config(mut self, config: CatalogConfig) -> Self {
        self.config = config;
        self
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Build the router
    pub fn build(self) -> Result<Router> {
        self.config.validate()?;

        let repository = self.repository.ok_or_else(|| {
            anyhow::anyhow!("ListingRepository is required. Call .with_repository()")
        })?;

        let search = self
            .parser
            .map(|parser| Arc::new(SearchCoordinator::from_config(parser, &self.config)));
        if search.is_none() {
            tracing::info!("no free-text parser configured; POST /search will answer 503");
        }

        let state = AppState {
            repository,
            search,
            config: Arc::new(self.config),
        };

        let mut app = health_routes().merge(build_catalog_routes(state));
        for custom_router in self.custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Stops accepting connections on SIGTERM or Ctrl+C and lets in-flight
    /// requests finish.
    ///
    /// # Example
    ///
    /// ```ignore
    /// ServerBuilder::new()
    ///     .with_repository(repository)
    ///     .serve("127.0.0.1:3000").await?;
    /// ```
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Catalog server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on the configured `listen_addr`
    pub async fn serve_configured(self) -> Result<()> {
        let addr = self.config.listen_addr.clone();
        self.serve(&addr).await
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::CatalogDomain;
    use crate::core::merge::ParsedFilter;
    use crate::search::{FnParser, ParseError};
    use crate::storage::InMemoryListingRepository;

    #[test]
    fn test_new_creates_empty_builder() {
        let builder = ServerBuilder::new();
        assert!(builder.repository.is_none());
        assert!(builder.parser.is_none());
        assert_eq!(builder.config, CatalogConfig::default());
    }

    #[test]
    fn test_build_without_repository_fails() {
        let err = ServerBuilder::new().build().unwrap_err();
        assert!(err.to_string().contains("ListingRepository is required"));
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let config = CatalogConfig {
            page_size: 0,
            ..Default::default()
        };
        let result = ServerBuilder::new()
            .with_repository(InMemoryListingRepository::new())
            .with_config(config)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_build_with_parser_and_custom_routes() {
        let parser = FnParser(|_: &str, _: &CatalogDomain| -> Result<ParsedFilter, ParseError> {
            Ok(ParsedFilter::default())
        });
        let extra = Router::new().route("/ping", axum::routing::get(|| async { "pong" }));

        let result = ServerBuilder::new()
            .with_repository(InMemoryListingRepository::new())
            .with_parser(parser)
            .with_custom_routes(extra)
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_from_config_uses_listings_file() {
        let config = CatalogConfig {
            listings_file: Some("listings.json".into()),
            ..Default::default()
        };
        let builder = ServerBuilder::from_config(config).unwrap();
        assert_eq!(
            builder.repository.as_ref().map(|r| r.backend()),
            Some("json-file")
        );
    }

    #[test]
    fn test_from_config_without_source_needs_repository() {
        let builder = ServerBuilder::from_config(CatalogConfig::default()).unwrap();
        assert!(builder.build().is_err());
    }
}
