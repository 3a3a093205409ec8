//! Redirect handler: one link of the lookup chain.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::extract::Request;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use percent_encoding::percent_decode_str;
use tower::{Layer, Service, ServiceExt};
use tracing::{debug, warn};

use crate::domain::resolver::PathResolver;

/// Resolves the request path and redirects, or hands the request to `fallback`.
///
/// # Request Flow
///
/// 1. Extract the URI path (query string excluded) and percent-decode it
/// 2. Resolve it against the configured source
/// 3. **Found**: return 308 Permanent Redirect with `Location` set to the url
/// 4. **Not found**, **empty url**, **url unusable as a header**, or
///    **store error**: call `fallback` with the untouched request
///
/// The fallback may itself be a `RedirectHandler`, so handlers nest into a
/// chain that ends in a terminal handler. Store errors are logged and never
/// turned into an error response.
pub struct RedirectHandler<F> {
    resolver: Arc<dyn PathResolver>,
    fallback: F,
}

impl<F> RedirectHandler<F> {
    pub fn new(resolver: Arc<dyn PathResolver>, fallback: F) -> Self {
        Self { resolver, fallback }
    }
}

impl<F: Clone> Clone for RedirectHandler<F> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
            fallback: self.fallback.clone(),
        }
    }
}

impl<F> Service<Request> for RedirectHandler<F>
where
    F: Service<Request, Response = Response, Error = Infallible> + Clone + Send + 'static,
    F::Future: Send + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let resolver = Arc::clone(&self.resolver);
        let fallback = self.fallback.clone();

        Box::pin(async move {
            let path = decode_path(req.uri().path());

            match resolver.resolve(&path).await {
                Ok(Some(url)) if !url.is_empty() => match HeaderValue::try_from(url.as_str()) {
                    Ok(location) => {
                        debug!("Redirect HIT: {} -> {}", path, url);
                        Ok((StatusCode::PERMANENT_REDIRECT, [(header::LOCATION, location)])
                            .into_response())
                    }
                    Err(_) => {
                        warn!("Stored url for {} is not a valid Location, falling back", path);
                        fallback.oneshot(req).await
                    }
                },
                Ok(_) => {
                    debug!("Redirect MISS: {}", path);
                    fallback.oneshot(req).await
                }
                Err(e) => {
                    warn!("Lookup failed for {}: {}. Falling back.", path, e);
                    fallback.oneshot(req).await
                }
            }
        })
    }
}

/// Percent-decodes a request path, keeping the raw path when the decoded
/// bytes are not UTF-8.
fn decode_path(raw: &str) -> String {
    match percent_decode_str(raw).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_owned(),
    }
}

/// [`Layer`] that wraps a fallback service in a [`RedirectHandler`].
#[derive(Clone)]
pub struct RedirectLayer {
    resolver: Arc<dyn PathResolver>,
}

impl RedirectLayer {
    pub fn new(resolver: Arc<dyn PathResolver>) -> Self {
        Self { resolver }
    }
}

impl<F> Layer<F> for RedirectLayer {
    type Service = RedirectHandler<F>;

    fn layer(&self, fallback: F) -> Self::Service {
        RedirectHandler::new(Arc::clone(&self.resolver), fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::resolver::MockPathResolver;
    use crate::error::StoreError;
    use axum::body::{Body, to_bytes};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::service_fn;
    use tower::util::BoxCloneSyncService;

    type TestFallback = BoxCloneSyncService<Request, Response, Infallible>;

    fn counting_fallback(counter: Arc<AtomicUsize>) -> TestFallback {
        BoxCloneSyncService::new(service_fn(move |_req: Request| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, Infallible>("fallback".into_response())
            }
        }))
    }

    fn request(path: &str) -> Request {
        Request::builder().uri(path).body(Body::empty()).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_found_path_redirects_permanently() {
        let mut resolver = MockPathResolver::new();
        resolver
            .expect_resolve()
            .times(1)
            .returning(|_| Ok(Some("https://a.test/target".to_string())));

        let calls = Arc::new(AtomicUsize::new(0));
        let handler = RedirectHandler::new(Arc::new(resolver), counting_fallback(calls.clone()));

        let response = handler.oneshot(request("/a")).await.unwrap();

        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "https://a.test/target"
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_path_calls_fallback_once() {
        let mut resolver = MockPathResolver::new();
        resolver.expect_resolve().times(1).returning(|_| Ok(None));

        let calls = Arc::new(AtomicUsize::new(0));
        let handler = RedirectHandler::new(Arc::new(resolver), counting_fallback(calls.clone()));

        let response = handler.oneshot(request("/unknown")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "fallback");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_store_error_falls_through() {
        let mut resolver = MockPathResolver::new();
        resolver.expect_resolve().times(1).returning(|path| {
            Err(StoreError::InvalidValue {
                path: path.to_string(),
            })
        });

        let calls = Arc::new(AtomicUsize::new(0));
        let handler = RedirectHandler::new(Arc::new(resolver), counting_fallback(calls.clone()));

        let response = handler.oneshot(request("/broken")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_url_is_not_a_redirect() {
        let mut resolver = MockPathResolver::new();
        resolver
            .expect_resolve()
            .times(1)
            .returning(|_| Ok(Some(String::new())));

        let calls = Arc::new(AtomicUsize::new(0));
        let handler = RedirectHandler::new(Arc::new(resolver), counting_fallback(calls.clone()));

        let response = handler.oneshot(request("/empty")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::LOCATION).is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_resolves_path_without_query() {
        let mut resolver = MockPathResolver::new();
        resolver
            .expect_resolve()
            .times(1)
            .returning(|path| Ok((path == "/a").then(|| "https://a.test".to_string())));

        let calls = Arc::new(AtomicUsize::new(0));
        let handler = RedirectLayer::new(Arc::new(resolver)).layer(counting_fallback(calls));

        let response = handler.oneshot(request("/a?utm=1")).await.unwrap();

        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    }

    #[tokio::test]
    async fn test_url_with_control_character_falls_through() {
        let mut resolver = MockPathResolver::new();
        resolver
            .expect_resolve()
            .times(1)
            .returning(|_| Ok(Some("https://a.test/\nfoo".to_string())));

        let calls = Arc::new(AtomicUsize::new(0));
        let handler = RedirectHandler::new(Arc::new(resolver), counting_fallback(calls.clone()));

        let response = handler.oneshot(request("/x")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::LOCATION).is_none());
        assert_eq!(body_text(response).await, "fallback");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_resolves_percent_decoded_path() {
        let mut resolver = MockPathResolver::new();
        resolver
            .expect_resolve()
            .times(1)
            .returning(|path| Ok((path == "/a b").then(|| "https://a.test".to_string())));

        let calls = Arc::new(AtomicUsize::new(0));
        let handler = RedirectHandler::new(Arc::new(resolver), counting_fallback(calls.clone()));

        let response = handler.oneshot(request("/a%20b")).await.unwrap();

        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_decode_path() {
        assert_eq!(decode_path("/caf%C3%A9"), "/café");
        assert_eq!(decode_path("/plain"), "/plain");
        assert_eq!(decode_path("/bad%FF"), "/bad%FF");
    }
}
