use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::errors::ErrorDetail;
use crate::views::ErrorPage;
use crate::AppState;

/// Error boundary for development: error pages are re-rendered with the
/// debug detail of the failure that produced them. Outside development the
/// response passes through untouched.
pub async fn expose_error_details(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    if !state.config.is_development() {
        return response;
    }

    let Some(failure) = response.extensions().get::<ErrorDetail>().cloned() else {
        return response;
    };

    let status = response.status();
    let request_id = crate::tracing::current_request_id().map(|rid| rid.as_str().to_string());
    ErrorPage::new(status, failure.message, request_id, Some(failure.detail))
        .into_response_with_status(status)
}
