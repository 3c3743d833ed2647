use anyhow::anyhow;
use tokengate_auth::roles::DEFAULT_AUTHORITIES;
use tokengate_core::{AppError, hash_password};
use tokengate_db::{NewUser, StoreError, UserStore};
use tokengate_observability::track_user_created;
use tracing::instrument;

use super::model::{SignupRequest, UserResponse};

pub struct UserService;

impl UserService {
    #[instrument(skip(users, dto), fields(username = %dto.username))]
    pub async fn signup(users: &dyn UserStore, dto: SignupRequest) -> Result<UserResponse, AppError> {
        let new_user = NewUser {
            username: dto.username,
            password_hash: hash_password(&dto.password)?,
            nickname: dto.nickname,
            authorities: DEFAULT_AUTHORITIES.iter().map(|r| r.to_string()).collect(),
        };

        let user = users.create(new_user).await.map_err(|e| match e {
            StoreError::Duplicate(username) => {
                AppError::conflict(anyhow!("Username '{}' is already taken", username))
            }
            other => AppError::internal(other),
        })?;

        track_user_created();
        tracing::info!("user registered");

        Ok(user.into())
    }

    #[instrument(skip(users))]
    pub async fn find_by_username(
        users: &dyn UserStore,
        username: &str,
    ) -> Result<UserResponse, AppError> {
        users
            .find_by_username(username)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::not_found(anyhow!("User '{}' not found", username)))
    }
}
