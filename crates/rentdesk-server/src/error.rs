//! HTTP error type and its JSON rendering.
//!
//! Every failure is rendered as
//! `{"error": {"code", "message", "status"}}`; a 409 also carries
//! `currentStatus` and `allowedStatuses`.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use rentdesk_core::enums::MaintenanceStatus;
use rentdesk_core::errors::CoreError;
use rentdesk_db::error::DatabaseError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Conflict {
        message: String,
        current_status: MaintenanceStatus,
        allowed: Vec<MaintenanceStatus>,
    },

    #[error("{0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict { .. } => "INVALID_TRANSITION",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(msg) => Self::Validation(msg),
            CoreError::Unauthorized { .. } => Self::Forbidden(error.to_string()),
            CoreError::NotFound { .. } => Self::NotFound(error.to_string()),
            CoreError::InvalidTransition { from, ref allowed, .. } => Self::Conflict {
                allowed: allowed.clone(),
                current_status: from,
                message: error.to_string(),
            },
            CoreError::Other(e) => Self::Internal(format!("{e:#}")),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::Core(core) => core.into(),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let mut body = json!({
            "code": self.code(),
            "message": self.to_string(),
            "status": status.as_u16(),
        });
        if let Self::Conflict {
            current_status,
            allowed,
            ..
        } = &self
        {
            body["currentStatus"] = json!(current_status);
            body["allowedStatuses"] = json!(allowed);
        }

        (status, Json(json!({ "error": body }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rentdesk_core::enums::EntityType;

    #[test]
    fn core_errors_map_to_statuses() {
        let cases = [
            (CoreError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (CoreError::unauthorized("nope"), StatusCode::FORBIDDEN),
            (
                CoreError::NotFound {
                    entity_type: EntityType::MaintenanceRequest,
                    id: 1,
                },
                StatusCode::NOT_FOUND,
            ),
            (
                CoreError::invalid_transition(
                    1,
                    MaintenanceStatus::Completed,
                    MaintenanceStatus::Urgent,
                ),
                StatusCode::CONFLICT,
            ),
            (
                CoreError::Other(anyhow::anyhow!("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, expected) in cases {
            assert_eq!(ApiError::from(error).status(), expected);
        }
    }

    #[test]
    fn storage_errors_are_internal() {
        let error = ApiError::from(DatabaseError::NoResult);
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn conflict_carries_allowed_statuses() {
        let error = ApiError::from(CoreError::invalid_transition(
            3,
            MaintenanceStatus::Completed,
            MaintenanceStatus::Urgent,
        ));
        match error {
            ApiError::Conflict {
                current_status,
                allowed,
                ..
            } => {
                assert_eq!(current_status, MaintenanceStatus::Completed);
                assert_eq!(allowed, vec![MaintenanceStatus::Pending]);
            }
            other => panic!("expected conflict, got {other:?}"),
        }
    }
}
