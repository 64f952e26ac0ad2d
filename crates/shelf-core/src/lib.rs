//! Core abstractions for Quick Shelf workloads.
//!
//! This crate provides the fundamental types:
//! - `RequestContext` - Typed request parameters and headers
//! - `RouteConfig` / `Router` - Explicit route registration and dispatch
//! - `ApiResponse` / `ApiError` - JSON responses in the REST error shape
//! - `WorkloadManifest` - Description of a deployable unit
//! - `TimingContext` - Request timing marks

mod config;
mod context;
mod lifecycle;
mod response;
mod router;
mod workload;

pub use config::*;
pub use context::*;
pub use lifecycle::*;
pub use response::*;
pub use router::*;
pub use workload::*;
