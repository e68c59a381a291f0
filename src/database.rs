//! Process-wide storage handle.
//!
//! ```sql
//! CREATE TABLE users (
//!     id TEXT PRIMARY KEY,
//!     name TEXT NOT NULL,
//!     surname TEXT NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! CREATE INDEX ix_users_created_at ON users (created_at);
//!
//! CREATE TABLE orders (
//!     id TEXT PRIMARY KEY,
//!     description TEXT NOT NULL,
//!     customer TEXT NOT NULL REFERENCES users (id)
//! );
//! CREATE INDEX ix_orders_customer ON orders (customer);
//! ```

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;
use crate::StoreResult;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        surname TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS ix_users_created_at ON users (created_at)",
    r#"
    CREATE TABLE IF NOT EXISTS orders (
        id TEXT PRIMARY KEY,
        description TEXT NOT NULL,
        customer TEXT NOT NULL REFERENCES users (id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS ix_orders_customer ON orders (customer)",
];

/// Owns the connection pool. Clones share the same pool.
#[derive(Clone, Debug)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Configures the pool for `config.url` without opening a connection.
    pub fn init(config: &DatabaseConfig) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_lazy(&config.url)?;
        Ok(Self { pool })
    }

    /// Wraps an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the tables and indexes that do not exist yet.
    ///
    /// This is the first statement the process sends, so an unreachable
    /// database surfaces here.
    #[tracing::instrument(skip(self))]
    pub async fn create_all(&self) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;
        for statement in SCHEMA {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        tracing::info!("schema ready");
        Ok(())
    }

    /// Round trip used by the health endpoint.
    pub async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Closes every connection. No operation is valid afterwards.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("database connections closed");
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}
