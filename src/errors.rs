use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::error::DbErr;
use tracing::error;

use crate::views::ErrorPage;

fn current_request_id() -> Option<String> {
    crate::tracing::current_request_id().map(|rid| rid.as_str().to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Template error: {0}")]
    TemplateError(#[from] askama::Error),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Debug rendering of a failed request, attached to error responses so the
/// development error boundary can show it.
#[derive(Debug, Clone)]
pub struct ErrorDetail {
    pub message: String,
    pub detail: String,
}

impl ServiceError {
    /// Wraps a database error.
    pub fn db_error(error: DbErr) -> Self {
        ServiceError::DatabaseError(error)
    }

    /// Shorthand for a not-found failure on the named record kind.
    pub fn not_found(what: &str) -> Self {
        ServiceError::NotFound(format!("{} not found", what))
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::DatabaseError(_) | Self::TemplateError(_) | Self::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the error message suitable for the rendered error page.
    /// Internal errors return generic messages to avoid leaking implementation details.
    pub fn response_message(&self) -> String {
        match self {
            Self::NotFound(msg) => msg.clone(),
            Self::DatabaseError(_) => "Database error".to_string(),
            Self::TemplateError(_) | Self::InternalError(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.response_message();

        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        let page = ErrorPage::new(status, message.clone(), current_request_id(), None);
        let mut response = page.into_response_with_status(status);
        response.extensions_mut().insert(ErrorDetail {
            message,
            detail: format!("{:#?}", self),
        });
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn service_error_status_code_mapping() {
        assert_eq!(
            ServiceError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::db_error(DbErr::Custom("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServiceError::InternalError("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn response_message_hides_internal_details() {
        assert_eq!(
            ServiceError::db_error(DbErr::Custom("password=hunter2".into())).response_message(),
            "Database error"
        );
        assert_eq!(
            ServiceError::InternalError("stack".into()).response_message(),
            "Internal server error"
        );
        assert_eq!(
            ServiceError::not_found("Category").response_message(),
            "Category not found"
        );
    }

    #[tokio::test]
    async fn error_response_renders_page_with_request_id() {
        let response =
            crate::tracing::scope_request_id(crate::tracing::RequestId::new("req-123"), async {
                ServiceError::not_found("Item").into_response()
            })
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.extensions().get::<ErrorDetail>().is_some());

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Item not found"));
        assert!(html.contains("req-123"));
    }

    #[tokio::test]
    async fn error_page_omits_detail_by_default() {
        let response = ServiceError::InternalError("secret internals".into()).into_response();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(!html.contains("secret internals"));
    }
}
