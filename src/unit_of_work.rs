use async_trait::async_trait;
use sqlx::{Postgres, Transaction};

use crate::{Database, Executor, StoreResult};

/// Unit of Work pattern for managing database transactions.
///
/// Every entity operation begins its own session, runs its statements
/// through the session's executor and finishes with [`complete`].
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    type Session: UnitOfWorkSession;

    /// Begin a new transaction session.
    async fn begin(&self) -> StoreResult<Self::Session>;
}

/// Represents a single database transaction session.
#[async_trait]
pub trait UnitOfWorkSession: Send + Sync {
    /// Get the executor for this session (provides access to the transaction).
    fn executor(&self) -> &Executor;

    /// Commit the transaction.
    async fn commit(self) -> StoreResult<()>;

    /// Rollback the transaction.
    async fn rollback(self) -> StoreResult<()>;
}

#[async_trait]
impl UnitOfWork for Database {
    type Session = PostgresSession;

    async fn begin(&self) -> StoreResult<Self::Session> {
        let tx = self.pool().begin().await?;
        Ok(PostgresSession::new(tx))
    }
}

/// Transaction session over a PostgreSQL connection borrowed from the pool.
pub struct PostgresSession {
    executor: Executor,
}

impl PostgresSession {
    /// Create a new session from a PostgreSQL transaction.
    pub fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self {
            executor: Executor::new(tx),
        }
    }
}

#[async_trait]
impl UnitOfWorkSession for PostgresSession {
    fn executor(&self) -> &Executor {
        &self.executor
    }

    async fn commit(self) -> StoreResult<()> {
        let tx = self.executor.take_transaction().await?;
        tx.commit().await?;
        tracing::debug!("transaction committed");
        Ok(())
    }

    async fn rollback(self) -> StoreResult<()> {
        let tx = self.executor.take_transaction().await?;
        tx.rollback().await?;
        tracing::debug!("transaction rolled back");
        Ok(())
    }
}

/// Finishes a session according to the outcome of the work done in it.
///
/// Commits on success. On failure the session is rolled back and the
/// original error is returned; a failing rollback is only logged.
pub async fn complete<S, T>(session: S, result: StoreResult<T>) -> StoreResult<T>
where
    S: UnitOfWorkSession,
    T: Send,
{
    match result {
        Ok(value) => {
            session.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = session.rollback().await {
                tracing::warn!(error = %rollback_err, "rollback failed");
            }
            Err(err)
        }
    }
}
