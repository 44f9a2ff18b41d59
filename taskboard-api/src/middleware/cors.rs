/// CORS middleware
///
/// Adds permissive cross-origin headers to every response and answers any
/// `OPTIONS` request itself with `204 No Content`, so preflights never reach
/// routing or handlers.
///
/// # Headers Applied
///
/// - `Access-Control-Allow-Origin: *`
/// - `Access-Control-Allow-Credentials: true`
/// - `Access-Control-Allow-Headers: Content-Type, Content-Length, ...`
/// - `Access-Control-Allow-Methods: POST, OPTIONS, GET, PUT`
///
/// # Example
///
/// ```no_run
/// use axum::Router;
/// use taskboard_api::middleware::cors::CorsLayer;
///
/// let app: Router = Router::new().layer(CorsLayer::new());
/// ```

use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::Response,
};
use futures::future::BoxFuture;
use std::task::{Context, Poll};
use tower::{Layer, Service};

const ALLOW_HEADERS: &str = "Content-Type, Content-Length, Accept-Encoding, X-CSRF-Token, \
     Authorization, accept, origin, Cache-Control, X-Requested-With";
const ALLOW_METHODS: &str = "POST, OPTIONS, GET, PUT";

/// CORS middleware layer
#[derive(Clone, Default)]
pub struct CorsLayer;

impl CorsLayer {
    /// Creates a new CORS layer
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for CorsLayer {
    type Service = CorsMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorsMiddleware { inner }
    }
}

/// CORS middleware service
#[derive(Clone)]
pub struct CorsMiddleware<S> {
    inner: S,
}

fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
}

impl<S> Service<Request> for CorsMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        if request.method() == Method::OPTIONS {
            let mut response = Response::new(Body::empty());
            *response.status_mut() = StatusCode::NO_CONTENT;
            apply_cors_headers(response.headers_mut());
            return Box::pin(async move { Ok(response) });
        }

        let future = self.inner.call(request);

        Box::pin(async move {
            let mut response = future.await?;
            apply_cors_headers(response.headers_mut());
            Ok(response)
        })
    }
}
