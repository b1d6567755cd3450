//! Mapping from catalog errors to HTTP responses
//!
//! Storage diagnostics are logged here and replaced by a generic message;
//! the client only ever sees validation and not-found details.

use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fyyur_common::Error;
use serde_json::json;
use std::any::Any;
use tracing::{debug, error, warn};

/// Errors returned by handlers
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    MethodNotAllowed(String),
    Internal,
}

impl ApiError {
    /// Map an error raised while changing data
    ///
    /// Every failure other than a missing record becomes a 400; `action`
    /// completes the generic message, e.g. "Venue Blue Note could not be listed".
    pub fn from_mutation(err: Error, action: &str) -> Self {
        match err {
            Error::Validation(message) => {
                warn!("Rejected input ({}): {}", action, message);
                ApiError::BadRequest(format!("{}: {}", action, message))
            }
            Error::NotFound { kind, id } => ApiError::NotFound(format!("{} {} not found", kind, id)),
            other => {
                error!("{}: {}", action, other);
                ApiError::BadRequest(format!("An error occurred. {}.", action))
            }
        }
    }

    /// Map an error raised while reading data
    pub fn from_read(err: Error) -> Self {
        match err {
            Error::NotFound { kind, id } => ApiError::NotFound(format!("{} {} not found", kind, id)),
            Error::Validation(message) => ApiError::BadRequest(message),
            other => {
                error!("Read failed: {}", other);
                ApiError::Internal
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) | ApiError::MethodNotAllowed(msg) => msg,
            ApiError::Internal => "Something went wrong on our end. Please try again later.".to_string(),
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        debug!("Unmatched path parameter: {}", rejection.body_text());
        ApiError::NotFound("Page not found".to_string())
    }
}

/// Response for a handler that panicked
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Handler panicked: {}", detail);
    ApiError::Internal.into_response()
}

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Page not found".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fyyur_common::EntityKind;

    #[test]
    fn test_persistence_detail_is_not_exposed() {
        let err = ApiError::from_mutation(
            Error::Persistence(sqlx::Error::PoolClosed),
            "Venue The Musical Hop could not be listed",
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        match err {
            ApiError::BadRequest(message) => {
                assert_eq!(message, "An error occurred. Venue The Musical Hop could not be listed.");
                assert!(!message.contains("pool"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_read_failures_are_internal() {
        let err = ApiError::from_read(Error::Persistence(sqlx::Error::PoolClosed));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_keeps_404() {
        let err = ApiError::from_mutation(Error::not_found(EntityKind::Artist, 7), "Artist 7 could not be updated");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
