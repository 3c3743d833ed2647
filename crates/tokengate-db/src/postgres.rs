use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crate::store::{NewUser, StoreError, UserRecord, UserStore};

#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    username: String,
    password: String,
    nickname: String,
    activated: bool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn authorities_of(&self, user_id: i64) -> Result<Vec<String>, StoreError> {
        let authorities = sqlx::query_scalar::<_, String>(
            "SELECT authority_name FROM user_authorities WHERE user_id = $1 ORDER BY position",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(authorities)
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT user_id, username, password, nickname, activated FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let authorities = self.authorities_of(row.user_id).await?;

        Ok(Some(UserRecord {
            username: row.username,
            password_hash: row.password,
            nickname: row.nickname,
            activated: row.activated,
            authorities,
        }))
    }

    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let mut tx = self.pool.begin().await?;

        let user_id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (username, password, nickname, activated)
             VALUES ($1, $2, $3, TRUE)
             ON CONFLICT (username) DO NOTHING
             RETURNING user_id",
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.nickname)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| StoreError::Duplicate(user.username.clone()))?;

        for (position, authority) in user.authorities.iter().enumerate() {
            sqlx::query(
                "INSERT INTO user_authorities (user_id, authority_name, position)
                 VALUES ($1, $2, $3)
                 ON CONFLICT DO NOTHING",
            )
            .bind(user_id)
            .bind(authority)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(UserRecord::from(user))
    }
}
