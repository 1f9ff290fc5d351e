//! Application id gate.
//!
//! Every request under the cloud mount path must carry the configured
//! application id in `X-Parse-Application-Id`; anything else gets
//! `403 {"error": "unauthorized"}` before reaching a handler.

use axum::{
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::debug;

pub const APPLICATION_ID_HEADER: &str = "x-parse-application-id";

#[derive(Clone)]
pub struct ApplicationIdLayer {
    app_id: Arc<str>,
}

impl ApplicationIdLayer {
    pub fn new(app_id: impl Into<Arc<str>>) -> Self {
        Self { app_id: app_id.into() }
    }
}

impl<S> Layer<S> for ApplicationIdLayer {
    type Service = ApplicationIdMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ApplicationIdMiddleware {
            inner,
            app_id: self.app_id.clone(),
        }
    }
}

#[derive(Clone)]
pub struct ApplicationIdMiddleware<S> {
    inner: S,
    app_id: Arc<str>,
}

fn unauthorized() -> Response {
    (StatusCode::FORBIDDEN, Json(json!({ "error": "unauthorized" }))).into_response()
}

impl<S, B> Service<Request<B>> for ApplicationIdMiddleware<S>
where
    S: Service<Request<B>, Response = Response> + Send + Clone + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        let authorized = req
            .headers()
            .get(APPLICATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v == &*self.app_id)
            .unwrap_or(false);

        if !authorized {
            debug!(path = %req.uri().path(), "Rejected request without valid application id");
            return Box::pin(async { Ok(unauthorized()) });
        }

        let future = self.inner.call(req);
        Box::pin(async move { future.await })
    }
}
