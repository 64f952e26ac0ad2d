//! Search route.

use shelf_commerce::search::{Catalog, ProductSearch, SearchResult, SearchTerm};
use shelf_commerce::CommerceError;
use shelf_core::{ApiError, ApiResponse, Permission, RequestContext, RouteConfig, Router};
use shelf_observability::{LogSink, StructuredLogger};

use crate::SearchConfig;

/// Serves product searches from a catalog.
pub struct SearchService<C> {
    config: SearchConfig,
    catalog: C,
    sink: LogSink,
}

impl<C: Catalog> SearchService<C> {
    pub fn new(config: SearchConfig, catalog: C) -> Self {
        Self {
            config,
            catalog,
            sink: LogSink::Stderr,
        }
    }

    /// Send request logs somewhere other than stderr.
    pub fn with_log_sink(mut self, sink: LogSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// `GET <base>/search?term=...`
    pub fn handle_search(&self, ctx: &mut RequestContext) -> ApiResponse {
        let logger = StructuredLogger::new(ctx.request_id.clone())
            .with_workload(self.config.name.clone())
            .with_route(ctx.path.clone())
            .with_min_level(self.config.logging.level)
            .with_format(self.config.logging.format)
            .with_sink(self.sink.clone());

        let raw_term = ctx.query_param("term").unwrap_or_default();
        logger
            .info_builder("search request received")
            .field_i64("term_len", raw_term.chars().count() as i64)
            .field_bool("nonce_present", ctx.header(&self.config.nonce_header).is_some())
            .emit();

        let term = match SearchTerm::parse(raw_term, self.config.min_term_chars) {
            Ok(term) => term,
            Err(e) => {
                logger
                    .warn_builder("search term rejected")
                    .field("code", e.code())
                    .emit();
                return self.error_response(&e);
            }
        };

        let query = ProductSearch::new(term).with_limit(self.config.result_limit);
        ctx.timing.mark("query_start");

        let products = match self.catalog.search(&query) {
            Ok(products) => products,
            Err(e) => {
                logger
                    .error_builder("catalog search failed")
                    .field("error", e.to_string())
                    .emit();
                return self.error_response(&e);
            }
        };
        ctx.timing.mark("query_end");

        let results: Vec<SearchResult> = products
            .iter()
            .take(query.limit)
            .map(|p| SearchResult::from_product(p, &self.config.labels))
            .collect();

        logger
            .info_builder("search completed")
            .field_i64("results", results.len() as i64)
            .duration_ms(
                "query_ms",
                ctx.timing
                    .between("query_start", "query_end")
                    .unwrap_or_default(),
            )
            .emit();

        ApiResponse::json(200, &results)
    }

    fn error_response(&self, error: &CommerceError) -> ApiResponse {
        let message = match error {
            CommerceError::Validation { .. } => self.config.labels.term_required.clone(),
            // Store details stay in the logs.
            _ => "Search failed".to_string(),
        };
        ApiResponse::error(&ApiError::new(error.code(), message, error.status()))
    }
}

/// Router serving the search route.
pub fn build_router<C: Catalog + 'static>(service: SearchService<C>) -> Router {
    let route = RouteConfig::new(service.config.search_route(), "handle_search")
        .with_methods(vec!["GET"])
        .with_permission(Permission::Public);

    Router::new(service.config.name.clone(), env!("CARGO_PKG_VERSION"))
        .route(route, move |ctx| service.handle_search(ctx))
}
