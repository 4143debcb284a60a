use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::export::ExportError;
use crate::llm_client::LlmError;
use crate::models::patch::ProfileError;
use crate::wizard::session::WizardError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ProfileError> for AppError {
    fn from(e: ProfileError) -> Self {
        match e {
            ProfileError::UnknownRow { .. } => AppError::NotFound(e.to_string()),
            ProfileError::InvalidPath(_) | ProfileError::InvalidValue { .. } => {
                AppError::Validation(e.to_string())
            }
        }
    }
}

impl From<WizardError> for AppError {
    fn from(e: WizardError) -> Self {
        match e {
            WizardError::InvalidTransition { .. } | WizardError::Generating | WizardError::Busy(_) => {
                AppError::Conflict(e.to_string())
            }
            WizardError::EmptyInput(_) => AppError::Validation(e.to_string()),
            WizardError::Profile(inner) => inner.into(),
            WizardError::Gateway(inner) => AppError::Llm(inner),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Export(e) => {
                tracing::error!("Export error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_ERROR",
                    "The document could not be exported".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::enhance::EnhanceTarget;
    use crate::wizard::step::Step;

    fn status_of(e: impl Into<AppError>) -> StatusCode {
        e.into().into_response().status()
    }

    #[test]
    fn test_wizard_errors_map_to_status_codes() {
        assert_eq!(
            status_of(WizardError::InvalidTransition {
                from: Step::Preview,
                action: "advance"
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(WizardError::Busy(EnhanceTarget::Skills)),
            StatusCode::CONFLICT
        );
        assert_eq!(status_of(WizardError::Generating), StatusCode::CONFLICT);
        assert_eq!(
            status_of(WizardError::EmptyInput(EnhanceTarget::Summary)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(WizardError::Gateway(LlmError::EmptyContent)),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_profile_errors_map_to_status_codes() {
        assert_eq!(
            status_of(ProfileError::UnknownRow {
                kind: "experience",
                id: "x".into()
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ProfileError::InvalidPath("nope".into())),
            StatusCode::BAD_REQUEST
        );
    }
}
