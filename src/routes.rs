//! Top-level router.
//!
//! There are no fixed routes: every path, including `/`, goes through the
//! redirect chain mounted as the router fallback.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging

use axum::Router;

use crate::api::chain::BoxedHandler;
use crate::api::middleware::tracing;

/// Constructs the application router around a prebuilt handler chain.
pub fn app_router(chain: BoxedHandler) -> Router {
    Router::new()
        .fallback_service(chain)
        .layer(tracing::layer())
}
