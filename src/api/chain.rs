//! Construction of the redirect handler chain.
//!
//! ```text
//! request -> RedirectHandler(source 1)
//!              └─ miss -> RedirectHandler(source 2)
//!                           └─ miss -> ... -> terminal handler
//! ```
//!
//! The chain is built once at startup and shared read-only by every request.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::Request;
use axum::handler::HandlerWithoutStateExt;
use axum::response::Response;
use tower::util::BoxCloneSyncService;

use crate::api::handlers::{RedirectHandler, hello_handler};
use crate::domain::lookup_source::LookupSource;

/// Type-erased handler: any link of the chain, or the terminal handler.
pub type BoxedHandler = BoxCloneSyncService<Request, Response, Infallible>;

/// The default terminal handler, answering `Hello, world!`.
pub fn default_fallback() -> BoxedHandler {
    BoxCloneSyncService::new(hello_handler.into_service())
}

/// Wraps `fallback` in one redirect handler per source.
///
/// Sources are tried in iteration order: the first source is the outermost
/// handler and `fallback` runs only when every source misses.
pub fn build_chain<I>(sources: I, fallback: BoxedHandler) -> BoxedHandler
where
    I: IntoIterator<Item = LookupSource>,
    I::IntoIter: DoubleEndedIterator,
{
    sources.into_iter().rev().fold(fallback, |next, source| {
        tracing::debug!("Chaining {} lookup source", source.kind());
        BoxCloneSyncService::new(RedirectHandler::new(Arc::new(source), next))
    })
}
