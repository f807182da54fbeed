use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse};
use axum_valid::{ValidRejection, ValidationRejection};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::state::{
    collection::{ReviewError, TransitionError},
    lists::ListError,
    profile::ProfileError,
    recommendation::Superseded,
};

/// Message shown whenever the recommender could not produce a usable answer.
pub const RECOMMENDATION_FAILED: &str = "Failed to get recommendations. Please try again later.";
/// Message shown when no catalog game matches the submitted preferences.
pub const NO_MATCH: &str =
    "Couldn't find a matching game with those preferences. Try broadening your search!";

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Invalid input provided by the client.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// The caller does not own the resource.
    #[error("forbidden: {0}")]
    Forbidden(String),
    /// No catalog game satisfies the discover preferences.
    #[error("{}", NO_MATCH)]
    NoMatch,
    /// The recommender failed; details are logged, not exposed.
    #[error("{}", RECOMMENDATION_FAILED)]
    RecommendationFailed,
    /// A newer request replaced this one before it completed.
    #[error("superseded: {0}")]
    Superseded(String),
}

impl From<TransitionError> for ServiceError {
    fn from(err: TransitionError) -> Self {
        ServiceError::InvalidInput(err.to_string())
    }
}

impl From<ReviewError> for ServiceError {
    fn from(err: ReviewError) -> Self {
        ServiceError::InvalidInput(err.to_string())
    }
}

impl From<ProfileError> for ServiceError {
    fn from(err: ProfileError) -> Self {
        ServiceError::InvalidInput(err.to_string())
    }
}

impl From<ListError> for ServiceError {
    fn from(err: ListError) -> Self {
        match err {
            ListError::NotFound { .. } => ServiceError::NotFound(err.to_string()),
            ListError::NotAuthor { .. } => ServiceError::Forbidden(err.to_string()),
        }
    }
}

impl From<Superseded> for ServiceError {
    fn from(err: Superseded) -> Self {
        ServiceError::Superseded(err.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        AppError::BadRequest(format!("validation failed: {}", err))
    }
}

impl From<ValidRejection<JsonRejection>> for AppError {
    fn from(rejection: ValidRejection<JsonRejection>) -> Self {
        match rejection {
            ValidationRejection::Valid(errors) => errors.into(),
            ValidationRejection::Inner(err) => AppError::BadRequest(err.body_text()),
        }
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Caller is not allowed to touch the resource.
    #[error("forbidden: {0}")]
    Forbidden(String),
    /// Requested resource not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Search came back empty; the message is shown as is.
    #[error("{0}")]
    NoMatch(String),
    /// Conflict with current state.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Upstream dependency failed.
    #[error("{0}")]
    BadGateway(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(message) => AppError::BadRequest(message),
            ServiceError::NotFound(message) => AppError::NotFound(message),
            ServiceError::Forbidden(message) => AppError::Forbidden(message),
            ServiceError::NoMatch => AppError::NoMatch(NO_MATCH.into()),
            ServiceError::RecommendationFailed => AppError::BadGateway(RECOMMENDATION_FAILED.into()),
            ServiceError::Superseded(message) => AppError::Conflict(message),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) | AppError::NoMatch(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
        };

        let payload = Json(ErrorBody {
            message: self.to_string(),
        });

        (status, payload).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ServiceError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (ServiceError::NoMatch, StatusCode::NOT_FOUND),
            (ServiceError::RecommendationFailed, StatusCode::BAD_GATEWAY),
            (ServiceError::Superseded("x".into()), StatusCode::CONFLICT),
        ];

        for (err, status) in cases {
            let response = AppError::from(err).into_response();
            assert_eq!(response.status(), status);
        }
    }

    #[test]
    fn list_errors_split_by_kind() {
        let missing: ServiceError = ListError::NotFound {
            list_id: "l".into(),
        }
        .into();
        let foreign: ServiceError = ListError::NotAuthor {
            list_id: "l".into(),
        }
        .into();

        assert!(matches!(missing, ServiceError::NotFound(_)));
        assert!(matches!(foreign, ServiceError::Forbidden(_)));
    }

    #[test]
    fn validation_rejections_become_bad_requests() {
        let mut errors = ValidationErrors::new();
        errors.add("rating", validator::ValidationError::new("range"));

        let err = AppError::from(ValidRejection::<JsonRejection>::Valid(errors));

        assert!(matches!(&err, AppError::BadRequest(message) if message.contains("rating")));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn user_facing_messages_are_verbatim() {
        assert_eq!(
            AppError::from(ServiceError::RecommendationFailed).to_string(),
            RECOMMENDATION_FAILED
        );
        assert_eq!(AppError::from(ServiceError::NoMatch).to_string(), NO_MATCH);
    }
}
