use sqlx::{PgConnection, Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use crate::{StoreError, StoreResult};

/// Executor wraps the transaction of one session for use by repositories.
///
/// Cloning is cheap; every clone refers to the same transaction, which is
/// taken out when the session commits or rolls back.
#[derive(Clone, Debug)]
pub struct Executor {
    tx: Arc<Mutex<Option<Transaction<'static, Postgres>>>>,
}

impl Executor {
    /// Creates a new Executor from a PostgreSQL transaction.
    pub fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self {
            tx: Arc::new(Mutex::new(Some(tx))),
        }
    }

    /// Locks the transaction for the duration of one statement.
    pub async fn lock(&self) -> TxGuard<'_> {
        TxGuard {
            guard: self.tx.lock().await,
        }
    }

    /// Takes ownership of the transaction, leaving None in its place.
    pub(crate) async fn take_transaction(&self) -> StoreResult<Transaction<'static, Postgres>> {
        self.tx.lock().await.take().ok_or(StoreError::SessionClosed)
    }
}

/// Exclusive access to an open transaction.
pub struct TxGuard<'a> {
    guard: MutexGuard<'a, Option<Transaction<'static, Postgres>>>,
}

impl TxGuard<'_> {
    /// The connection to run statements against.
    ///
    /// Fails with [`StoreError::SessionClosed`] once the session has completed.
    pub fn conn(&mut self) -> StoreResult<&mut PgConnection> {
        let tx = self.guard.as_mut().ok_or(StoreError::SessionClosed)?;
        Ok(&mut **tx)
    }
}
