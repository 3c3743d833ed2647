use std::sync::Arc;

use anyhow::Context;
use tokengate_auth::TokenCodec;
use tokengate_auth::roles::ADMIN_AUTHORITIES;
use tokengate_config::{AdminSeed, AppConfig, CorsConfig};
use tokengate_core::hash_password;
use tokengate_db::{
    InMemoryUserStore, NewUser, PgUserStore, SharedUserStore, StoreError, init_db_pool,
    run_migrations,
};
use tokengate_observability::PrometheusHandle;

use crate::middleware::access::AccessRules;

/// Everything handlers and middleware share. All fields are read-only after
/// startup; the user store synchronises internally.
#[derive(Clone)]
pub struct AppState {
    pub users: SharedUserStore,
    pub tokens: TokenCodec,
    pub access_rules: Arc<AccessRules>,
    pub cors_config: CorsConfig,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(users: SharedUserStore, tokens: TokenCodec) -> Self {
        Self {
            users,
            tokens,
            access_rules: Arc::new(AccessRules::api_defaults()),
            cors_config: CorsConfig::default(),
            metrics: None,
        }
    }

    pub fn with_cors(mut self, cors_config: CorsConfig) -> Self {
        self.cors_config = cors_config;
        self
    }

    pub fn with_metrics(mut self, metrics: Option<PrometheusHandle>) -> Self {
        self.metrics = metrics;
        self
    }
}

/// Builds the shared state. Fails when the signing key cannot be decoded or
/// the configured database is unreachable.
pub async fn init_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let tokens = TokenCodec::from_config(&config.jwt).context("invalid JWT_SECRET")?;

    let users: SharedUserStore = match &config.store.database_url {
        Some(database_url) => {
            let pool = init_db_pool(database_url, config.store.max_connections)
                .await
                .context("failed to connect to database")?;
            run_migrations(&pool)
                .await
                .context("failed to apply migrations")?;
            tracing::info!("using PostgreSQL user store");
            Arc::new(PgUserStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, users are kept in memory and lost on restart");
            Arc::new(InMemoryUserStore::new())
        }
    };

    if let Some(admin) = &config.store.admin {
        seed_admin(&users, admin).await?;
    }

    Ok(AppState::new(users, tokens).with_cors(config.cors.clone()))
}

async fn seed_admin(users: &SharedUserStore, admin: &AdminSeed) -> anyhow::Result<()> {
    if users.find_by_username(&admin.username).await?.is_some() {
        tracing::debug!(username = %admin.username, "admin account already present");
        return Ok(());
    }

    let new_user = NewUser {
        username: admin.username.clone(),
        password_hash: hash_password(&admin.password).map_err(|e| e.error)?,
        nickname: admin.username.clone(),
        authorities: ADMIN_AUTHORITIES.iter().map(|r| r.to_string()).collect(),
    };

    match users.create(new_user).await {
        Ok(_) => {
            tracing::info!(username = %admin.username, "seeded admin account");
            Ok(())
        }
        // Another instance seeded it first
        Err(StoreError::Duplicate(_)) => Ok(()),
        Err(e) => Err(e.into()),
    }
}
