//! Request-scoped tracing helpers.
//!
//! Every request is tagged with a [`RequestId`] that is visible three ways:
//! in the `x-request-id` header, in the `http.request` span, and through a
//! task-local so code far from the handler (such as the error page) can read
//! it without threading it through every call.

use axum::http::Request;
use std::{cell::RefCell, fmt, future::Future};
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    trace::{DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, MakeSpan, TraceLayer},
};
use tracing::Level;
use uuid::Uuid;

/// Request ID tracking information
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(pub String);

impl Default for RequestId {
    fn default() -> Self {
        RequestId(Uuid::new_v4().to_string())
    }
}

impl RequestId {
    pub fn new(value: impl Into<String>) -> Self {
        RequestId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

tokio::task_local! {
    static CURRENT_REQUEST_ID: RefCell<Option<RequestId>>;
}

/// Runs `future` with `request_id` available through [`current_request_id`].
pub async fn scope_request_id<Fut, R>(request_id: RequestId, future: Fut) -> R
where
    Fut: Future<Output = R>,
{
    CURRENT_REQUEST_ID
        .scope(RefCell::new(Some(request_id)), future)
        .await
}

pub fn current_request_id() -> Option<RequestId> {
    CURRENT_REQUEST_ID
        .try_with(|cell| cell.borrow().clone())
        .ok()
        .flatten()
}

#[derive(Clone, Default)]
pub struct RequestSpanMaker;

impl<B> MakeSpan<B> for RequestSpanMaker {
    fn make_span(&mut self, request: &Request<B>) -> tracing::Span {
        let request_id = request
            .extensions()
            .get::<RequestId>()
            .cloned()
            .or_else(|| {
                request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .map(RequestId::new)
            })
            .unwrap_or_default();

        tracing::info_span!(
            "http.request",
            request_id = %request_id.as_str(),
            method = %request.method(),
            uri = %request.uri(),
        )
    }
}

/// HTTP trace layer: one span per request, 5xx responses logged as failures.
pub fn configure_http_tracing() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    RequestSpanMaker,
    DefaultOnRequest,
    DefaultOnResponse,
> {
    TraceLayer::new_for_http()
        .make_span_with(RequestSpanMaker)
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::INFO))
        .on_failure(DefaultOnFailure::new().level(Level::ERROR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn request_id_is_visible_inside_scope_only() {
        assert!(current_request_id().is_none());

        let seen = scope_request_id(RequestId::new("abc"), async { current_request_id() }).await;
        assert_eq!(seen, Some(RequestId::new("abc")));

        assert!(current_request_id().is_none());
    }

    #[test]
    fn default_request_ids_are_unique() {
        assert_ne!(RequestId::default(), RequestId::default());
    }
}
