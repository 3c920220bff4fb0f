//! Errors surfaced to HTTP clients.
//!
//! The `Display` text of each variant is exactly the `error` field sent to
//! the client. Store failures keep their cause as a source for logging only.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::types::ErrorBody;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("ID d'utilisateur non fourni")]
    MissingUserId,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Erreur lors de la récupération des informations de l'utilisateur")]
    UserLookup(#[source] StoreError),

    #[error("Erreur lors de la suppression de l'utilisateur")]
    UserDeletion(#[source] StoreError),

    /// A handler or store panicked; details are only logged.
    #[error("Internal Server Error")]
    Internal,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingUserId => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::UserLookup(_) | ApiError::UserDeletion(_) | ApiError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ApiError::UserLookup(source) | ApiError::UserDeletion(source) => {
                tracing::error!(status = %status, error = %source, "{}", self);
            }
            _ => tracing::debug!(status = %status, "{}", self),
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
