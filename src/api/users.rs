//! User controller.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::error::ApiError;
use crate::api::types::{MessageBody, UserRecord};
use crate::api::AppState;
use crate::store::UserStore;

pub const USER_DELETED_MESSAGE: &str = "Utilisateur supprimé avec succès";

/// Validates user ids and delegates to the configured [`UserStore`].
#[derive(Clone)]
pub struct UserController {
    store: Arc<dyn UserStore>,
}

impl UserController {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn user_info(&self, id: &str) -> Result<UserRecord, ApiError> {
        if id.is_empty() {
            return Err(ApiError::MissingUserId);
        }
        self.store.find_user(id).await.map_err(ApiError::UserLookup)
    }

    pub async fn delete_user(&self, id: &str) -> Result<MessageBody, ApiError> {
        if id.is_empty() {
            return Err(ApiError::MissingUserId);
        }
        self.store
            .delete_user(id)
            .await
            .map_err(ApiError::UserDeletion)?;

        tracing::info!(user_id = %id, "User deleted");
        Ok(MessageBody::new(USER_DELETED_MESSAGE))
    }
}

pub async fn get_user_info(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserRecord>, ApiError> {
    state.users.user_info(&id).await.map(Json)
}

/// `GET /user/`: the id segment is present but empty.
pub async fn get_user_info_without_id(
    State(state): State<AppState>,
) -> Result<Json<UserRecord>, ApiError> {
    state.users.user_info("").await.map(Json)
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, ApiError> {
    state.users.delete_user(&id).await.map(Json)
}

/// `DELETE /user/`: the id segment is present but empty.
pub async fn delete_user_without_id(
    State(state): State<AppState>,
) -> Result<Json<MessageBody>, ApiError> {
    state.users.delete_user("").await.map(Json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::store::{FixedUserStore, StoreError};

    struct BrokenStore;

    #[async_trait]
    impl UserStore for BrokenStore {
        async fn find_user(&self, _id: &str) -> Result<UserRecord, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }

        async fn delete_user(&self, _id: &str) -> Result<(), StoreError> {
            Err(StoreError::Backend("constraint violation".into()))
        }
    }

    fn fixed() -> UserController {
        UserController::new(Arc::new(FixedUserStore))
    }

    #[tokio::test]
    async fn test_empty_id_is_rejected_before_store() {
        let broken = UserController::new(Arc::new(BrokenStore));
        assert!(matches!(broken.user_info("").await, Err(ApiError::MissingUserId)));
        assert!(matches!(broken.delete_user("").await, Err(ApiError::MissingUserId)));
    }

    #[tokio::test]
    async fn test_user_info_returns_record() {
        let record = fixed().user_info("42").await.unwrap();
        assert_eq!(record.id, "42");
        assert_eq!(record.name, "John Doe");
    }

    #[tokio::test]
    async fn test_delete_returns_message() {
        let body = fixed().delete_user("42").await.unwrap();
        assert_eq!(body.message, USER_DELETED_MESSAGE);
    }

    #[tokio::test]
    async fn test_store_failures_map_to_server_errors() {
        let broken = UserController::new(Arc::new(BrokenStore));

        let err = broken.user_info("42").await.unwrap_err();
        assert!(matches!(err, ApiError::UserLookup(_)));
        assert!(err.status_code().is_server_error());

        let err = broken.delete_user("42").await.unwrap_err();
        assert!(matches!(err, ApiError::UserDeletion(_)));
        assert!(err.status_code().is_server_error());
    }
}
