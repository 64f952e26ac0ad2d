//! Route configuration.

use serde::{Deserialize, Serialize};

use crate::context::Method;

/// Who may call a route.
///
/// Anti-forgery tokens are checked by the host platform before a request
/// reaches a workload, so workloads only declare whether a route is public.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// Always allowed.
    #[default]
    Public,
    /// Requires an authenticated session issued by the host.
    Authenticated,
}

/// Configuration for a single route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Exact route path (e.g., "/quick-shelf/v1/search").
    pub pattern: String,
    /// Handler function name.
    pub handler: String,
    /// HTTP methods this route accepts.
    #[serde(default = "default_methods")]
    pub methods: Vec<String>,
    /// Permission policy.
    #[serde(default)]
    pub permission: Permission,
}

fn default_methods() -> Vec<String> {
    vec!["GET".to_string()]
}

impl RouteConfig {
    /// Create a new public GET route.
    pub fn new(pattern: impl Into<String>, handler: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            handler: handler.into(),
            methods: default_methods(),
            permission: Permission::Public,
        }
    }

    /// Set allowed HTTP methods.
    pub fn with_methods(mut self, methods: Vec<&str>) -> Self {
        self.methods = methods.into_iter().map(String::from).collect();
        self
    }

    /// Set the permission policy.
    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.permission = permission;
        self
    }

    /// Whether the route accepts a method.
    pub fn allows(&self, method: Method) -> bool {
        self.methods
            .iter()
            .any(|m| m.eq_ignore_ascii_case(method.as_str()))
    }

    /// Whether the route pattern matches a path. Trailing slashes are ignored.
    pub fn matches(&self, path: &str) -> bool {
        trim_slash(&self.pattern) == trim_slash(path)
    }
}

fn trim_slash(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// Join a route base and a path segment with exactly one slash.
pub fn join_route(base: &str, path: &str) -> String {
    format!(
        "/{}/{}",
        base.trim_matches('/'),
        path.trim_start_matches('/')
    )
    .replace("//", "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_defaults() {
        let route = RouteConfig::new("/quick-shelf/v1/search", "search");
        assert!(route.allows(Method::Get));
        assert!(!route.allows(Method::Post));
        assert_eq!(route.permission, Permission::Public);
    }

    #[test]
    fn test_route_matching_ignores_trailing_slash() {
        let route = RouteConfig::new("/quick-shelf/v1/search", "search");
        assert!(route.matches("/quick-shelf/v1/search/"));
        assert!(!route.matches("/quick-shelf/v1/searches"));
    }

    #[test]
    fn test_join_route() {
        assert_eq!(join_route("/quick-shelf/v1/", "/search"), "/quick-shelf/v1/search");
        assert_eq!(join_route("quick-shelf/v1", "search"), "/quick-shelf/v1/search");
        assert_eq!(join_route("/", "search"), "/search");
    }
}
