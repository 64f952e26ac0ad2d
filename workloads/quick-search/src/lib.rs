//! Quick Shelf search endpoint.
//!
//! Serves `GET /quick-shelf/v1/search?term=...` from the `products` table
//! of the component's SQLite database. Responses are a JSON array of at
//! most ten results ordered by units sold, then by last modification.

mod config;
mod handler;

pub use config::{ConfigError, LoggingConfig, SearchConfig, EMBEDDED_CONFIG};
pub use handler::{build_router, SearchService};

#[cfg(target_arch = "wasm32")]
mod component {
    use anyhow::Context;
    use shelf_commerce::search::SqliteCatalog;
    use shelf_core::{ApiError, ApiResponse, Method, RequestContext};
    use spin_sdk::http::{Method as SpinMethod, Request, Response};
    use spin_sdk::http_component;

    use crate::{build_router, SearchConfig, SearchService};

    /// Quick search handler.
    #[http_component]
    fn handle_quick_search(req: Request) -> anyhow::Result<Response> {
        let config = SearchConfig::embedded().context("loading embedded configuration")?;
        let catalog =
            SqliteCatalog::new(config.database.clone()).with_currency(config.currency()?);
        let nonce_header = config.nonce_header.clone();
        let router = build_router(SearchService::new(config, catalog));

        let method = match req.method() {
            SpinMethod::Get => Method::Get,
            SpinMethod::Post => Method::Post,
            SpinMethod::Put => Method::Put,
            SpinMethod::Delete => Method::Delete,
            SpinMethod::Patch => Method::Patch,
            SpinMethod::Head => Method::Head,
            SpinMethod::Options => Method::Options,
            _ => return Ok(to_spin(ApiResponse::error(&ApiError::method_not_allowed()))),
        };

        let path_with_query = match req.query() {
            "" => req.path().to_string(),
            query => format!("{}?{}", req.path(), query),
        };

        let mut ctx = RequestContext::new(method, path_with_query);
        if let Some(nonce) = req.header(&nonce_header).and_then(|v| v.as_str()) {
            ctx = ctx.with_header(&nonce_header, nonce);
        }

        Ok(to_spin(router.dispatch(&mut ctx)))
    }

    fn to_spin(resp: ApiResponse) -> Response {
        let mut builder = Response::builder();
        builder.status(resp.status);
        for (name, value) in &resp.headers {
            builder.header(name.as_str(), value.as_str());
        }
        builder.body(resp.body).build()
    }
}
