use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// Stored account as the authentication layer sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub username: String,
    pub password_hash: String,
    pub nickname: String,
    pub activated: bool,
    /// Role names in grant order
    pub authorities: Vec<String>,
}

/// Account to insert. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub nickname: String,
    pub authorities: Vec<String>,
}

impl From<NewUser> for UserRecord {
    fn from(user: NewUser) -> Self {
        Self {
            username: user.username,
            password_hash: user.password_hash,
            nickname: user.nickname,
            activated: true,
            authorities: user.authorities,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user '{0}' already exists")]
    Duplicate(String),
    #[error("user store failure: {0}")]
    Backend(#[from] sqlx::Error),
}

/// Lookup-by-username credential store.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Inserts a new account, failing with [`StoreError::Duplicate`] when the
    /// username is taken.
    async fn create(&self, user: NewUser) -> Result<UserRecord, StoreError>;
}

pub type SharedUserStore = Arc<dyn UserStore>;
