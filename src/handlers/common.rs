use crate::{errors::ServiceError, forms::FormErrors};
use axum::response::{IntoResponse, Redirect, Response};
use tracing::debug;
use uuid::Uuid;

/// Parses a path id. Malformed ids cannot name a stored record.
pub fn parse_uuid(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

/// Parses a path id, treating a malformed id as a missing `what`.
pub fn parse_id(raw: &str, what: &str) -> Result<Uuid, ServiceError> {
    parse_uuid(raw).ok_or_else(|| ServiceError::not_found(what))
}

/// 303 See Other to `location`
pub fn see_other(location: &str) -> Response {
    Redirect::to(location).into_response()
}

pub fn log_rejected(form: &'static str, errors: &FormErrors) {
    debug!(
        form,
        error_count = errors.len(),
        errors = ?errors.messages(),
        "Form submission rejected"
    );
}

/// Router fallback for unknown paths
pub async fn not_found() -> ServiceError {
    ServiceError::not_found("Page")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use axum::http::{header, StatusCode};

    #[test]
    fn malformed_ids_are_not_found() {
        assert_matches!(parse_id("nope", "Item"), Err(ServiceError::NotFound(msg)) if msg == "Item not found");
        assert!(parse_uuid(" 6f1c2d8e-4b7a-4c39-9d55-0a1b2c3d4e5f ").is_some());
    }

    #[test]
    fn see_other_sets_location() {
        let response = see_other("/shop/items");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/shop/items");
    }
}
