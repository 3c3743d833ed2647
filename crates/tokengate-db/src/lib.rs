//! # Tokengate DB
//!
//! The user store the authentication endpoint looks credentials up in.
//!
//! - [`store`]: the [`UserStore`] trait and its record types
//! - [`memory`]: [`InMemoryUserStore`], used when no database is configured
//! - [`postgres`]: [`PgUserStore`], backed by SQLx and PostgreSQL
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tokengate_db::{init_db_pool, PgUserStore, SharedUserStore};
//!
//! let pool = init_db_pool(&database_url, 5).await?;
//! tokengate_db::run_migrations(&pool).await?;
//! let users: SharedUserStore = Arc::new(PgUserStore::new(pool));
//! ```

pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::InMemoryUserStore;
pub use postgres::PgUserStore;
pub use store::{NewUser, SharedUserStore, StoreError, UserRecord, UserStore};

pub use sqlx::PgPool;

/// Opens a PostgreSQL connection pool.
///
/// Called once during startup; the pool is cheap to clone.
pub async fn init_db_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect(database_url)
        .await
}

/// Applies the bundled schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
