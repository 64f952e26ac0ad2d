//! Explicit route registration and dispatch.

use crate::config::RouteConfig;
use crate::context::RequestContext;
use crate::response::{ApiError, ApiResponse};
use crate::workload::WorkloadManifest;

/// A route handler.
pub type Handler = Box<dyn Fn(&mut RequestContext) -> ApiResponse>;

/// Routes registered by a workload.
///
/// Handlers are registered once at startup and matched by exact path.
/// Every dispatched response carries the request's `x-request-id`.
pub struct Router {
    manifest: WorkloadManifest,
    handlers: Vec<Handler>,
}

impl Router {
    /// Create an empty router for a workload.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            manifest: WorkloadManifest::new(name, version),
            handlers: Vec::new(),
        }
    }

    /// Register a handler for a route.
    pub fn route<F>(mut self, config: RouteConfig, handler: F) -> Self
    where
        F: Fn(&mut RequestContext) -> ApiResponse + 'static,
    {
        self.manifest = self.manifest.with_route(config);
        self.handlers.push(Box::new(handler));
        self
    }

    /// The manifest describing every registered route.
    pub fn manifest(&self) -> &WorkloadManifest {
        &self.manifest
    }

    /// Dispatch a request to the first route matching its path and method.
    pub fn dispatch(&self, ctx: &mut RequestContext) -> ApiResponse {
        let mut path_matched = None;

        for (config, handler) in self.manifest.routes.iter().zip(&self.handlers) {
            if !config.matches(&ctx.path) {
                continue;
            }
            if config.allows(ctx.method) {
                let response = handler(ctx);
                return response.with_header("x-request-id", ctx.request_id.to_string());
            }
            path_matched.get_or_insert(config);
        }

        let response = match path_matched {
            Some(config) => ApiResponse::error(&ApiError::method_not_allowed())
                .with_header("allow", config.methods.join(", ")),
            None => ApiResponse::error(&ApiError::no_route()),
        };
        response.with_header("x-request-id", ctx.request_id.to_string())
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("manifest", &self.manifest)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Method;

    fn router() -> Router {
        Router::new("quick-search", "0.1.0").route(
            RouteConfig::new("/quick-shelf/v1/search", "search"),
            |ctx| ApiResponse::json(200, &ctx.query_param("term")),
        )
    }

    #[test]
    fn test_dispatch_to_registered_route() {
        let mut ctx = RequestContext::new(Method::Get, "/quick-shelf/v1/search?term=mug");
        let resp = router().dispatch(&mut ctx);

        assert_eq!(resp.status, 200);
        assert_eq!(resp.json_body::<Option<String>>().unwrap().as_deref(), Some("mug"));
        assert_eq!(resp.header("x-request-id"), Some(ctx.request_id.0.as_str()));
    }

    #[test]
    fn test_unknown_path_is_404() {
        let mut ctx = RequestContext::new(Method::Get, "/nope");
        let resp = router().dispatch(&mut ctx);

        assert_eq!(resp.status, 404);
        let err: ApiError = resp.json_body().unwrap();
        assert_eq!(err.code, "rest_no_route");
    }

    #[test]
    fn test_wrong_method_is_405() {
        let mut ctx = RequestContext::new(Method::Post, "/quick-shelf/v1/search");
        let resp = router().dispatch(&mut ctx);

        assert_eq!(resp.status, 405);
        assert_eq!(resp.header("allow"), Some("GET"));
    }

    #[test]
    fn test_manifest_lists_routes() {
        let router = router();
        assert_eq!(router.manifest().name, "quick-search");
        assert_eq!(router.manifest().routes.len(), 1);
        assert_eq!(router.manifest().routes[0].handler, "search");
    }
}
