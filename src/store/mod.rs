//! User data access.
//!
//! Handlers only see the [`UserStore`] capability, so a real database can
//! replace [`FixedUserStore`] without touching routing or middleware.

pub mod fixed;

use async_trait::async_trait;
use thiserror::Error;

use crate::api::types::UserRecord;

pub use fixed::FixedUserStore;

/// Failures reported by a user store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached.
    #[error("user store unavailable: {0}")]
    Unavailable(String),

    /// The store answered but the operation failed.
    #[error("user store operation failed: {0}")]
    Backend(String),
}

/// Lookup and removal of user records.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    async fn find_user(&self, id: &str) -> Result<UserRecord, StoreError>;

    async fn delete_user(&self, id: &str) -> Result<(), StoreError>;
}
