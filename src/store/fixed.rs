//! Store that answers every request with the same record.

use async_trait::async_trait;

use crate::api::types::UserRecord;
use crate::store::{StoreError, UserStore};

pub const FIXED_USER_NAME: &str = "John Doe";
pub const FIXED_USER_EMAIL: &str = "john@example.com";

/// A stateless stand-in for a user database.
///
/// Lookups echo the requested id with a fixed name and email; deletions
/// always succeed and change nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedUserStore;

#[async_trait]
impl UserStore for FixedUserStore {
    async fn find_user(&self, id: &str) -> Result<UserRecord, StoreError> {
        Ok(UserRecord {
            id: id.to_string(),
            name: FIXED_USER_NAME.to_string(),
            email: FIXED_USER_EMAIL.to_string(),
        })
    }

    async fn delete_user(&self, id: &str) -> Result<(), StoreError> {
        tracing::debug!(user_id = %id, "Delete requested on fixed store, nothing to remove");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_echoes_id() {
        let store = FixedUserStore;
        let first = store.find_user("42").await.unwrap();
        assert_eq!(first.id, "42");
        assert_eq!(first.name, "John Doe");
        assert_eq!(first.email, "john@example.com");

        let other = store.find_user("7").await.unwrap();
        assert_eq!(other.id, "7");
        assert_eq!(other.name, first.name);
    }

    #[tokio::test]
    async fn test_delete_is_repeatable() {
        let store = FixedUserStore;
        assert!(store.delete_user("42").await.is_ok());
        assert!(store.delete_user("42").await.is_ok());
        assert_eq!(store.find_user("42").await.unwrap().id, "42");
    }
}
