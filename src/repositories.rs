//! Repository services for users and orders.
//!
//! Each operation runs in its own session: statements go through the
//! session's executor and the session is finished with [`complete`], which
//! commits on success and rolls back on error.

use crate::entities::{new_id, Order, User};
use crate::unit_of_work::complete;
use crate::{Database, Executor, StoreError, StoreResult, UnitOfWork, UnitOfWorkSession};

const USER_COLUMNS: &str = "id, name, surname, created_at";
const ORDER_COLUMNS: &str = "id, description, customer";

/// User Repository
#[derive(Clone, Debug)]
pub struct UserRepository {
    db: Database,
}

impl UserRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Inserts a user with a freshly generated id.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, name: &str, surname: &str) -> StoreResult<User> {
        let id = new_id();
        let session = self.db.begin().await?;
        let result = insert_user(session.executor(), &id, name, surname).await;
        let user = complete(session, result).await?;
        tracing::info!(user_id = %user.id, "user created");
        Ok(user)
    }

    /// Strict single-result fetch by id.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: &str) -> StoreResult<User> {
        let session = self.db.begin().await?;
        let result = fetch_user(session.executor(), id).await;
        complete(session, result)
            .await?
            .ok_or_else(|| StoreError::not_found("user", id))
    }

    /// Every user in insertion order.
    #[tracing::instrument(skip(self))]
    pub async fn get_all(&self) -> StoreResult<Vec<User>> {
        let session = self.db.begin().await?;
        let result = fetch_all_users(session.executor()).await;
        complete(session, result).await
    }

    /// Overwrites name and surname, then returns the stored record.
    ///
    /// An unknown id updates nothing and the re-fetch fails with
    /// [`StoreError::NotFound`].
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: &str, name: &str, surname: &str) -> StoreResult<User> {
        let session = self.db.begin().await?;
        let result = update_user(session.executor(), id, name, surname).await;
        let affected = complete(session, result).await?;
        tracing::debug!(affected, "user update committed");
        self.get(id).await
    }

    /// Deletes by id. Returns `true` whether or not a row matched.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        let session = self.db.begin().await?;
        let result = delete_user(session.executor(), id).await;
        let affected = complete(session, result).await?;
        tracing::debug!(affected, "user delete committed");
        Ok(true)
    }
}

async fn insert_user(
    executor: &Executor,
    id: &str,
    name: &str,
    surname: &str,
) -> StoreResult<User> {
    let mut tx = executor.lock().await;
    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (id, name, surname) VALUES ($1, $2, $3) RETURNING {USER_COLUMNS}"
    ))
    .bind(id)
    .bind(name)
    .bind(surname)
    .fetch_one(tx.conn()?)
    .await?;
    Ok(user)
}

async fn fetch_user(executor: &Executor, id: &str) -> StoreResult<Option<User>> {
    let mut tx = executor.lock().await;
    let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(tx.conn()?)
        .await?;
    Ok(user)
}

async fn fetch_all_users(executor: &Executor) -> StoreResult<Vec<User>> {
    let mut tx = executor.lock().await;
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY created_at, id"
    ))
    .fetch_all(tx.conn()?)
    .await?;
    Ok(users)
}

async fn update_user(executor: &Executor, id: &str, name: &str, surname: &str) -> StoreResult<u64> {
    let mut tx = executor.lock().await;
    let done = sqlx::query("UPDATE users SET name = $2, surname = $3 WHERE id = $1")
        .bind(id)
        .bind(name)
        .bind(surname)
        .execute(tx.conn()?)
        .await?;
    Ok(done.rows_affected())
}

async fn delete_user(executor: &Executor, id: &str) -> StoreResult<u64> {
    let mut tx = executor.lock().await;
    let done = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(tx.conn()?)
        .await?;
    Ok(done.rows_affected())
}

/// Order Repository
#[derive(Clone, Debug)]
pub struct OrderRepository {
    db: Database,
}

impl OrderRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Inserts an order. The customer is not checked up front; a dangling
    /// reference fails with [`StoreError::Constraint`] from the foreign key.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, description: &str, customer: &str) -> StoreResult<Order> {
        let id = new_id();
        let session = self.db.begin().await?;
        let result = insert_order(session.executor(), &id, description, customer).await;
        let order = complete(session, result).await?;
        tracing::info!(order_id = %order.id, customer = %order.customer, "order created");
        Ok(order)
    }

    /// Strict single-result fetch by id.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: &str) -> StoreResult<Order> {
        self.fetch_one(OrderFilter::Id(id))
            .await?
            .ok_or_else(|| StoreError::not_found("order", id))
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_all(&self) -> StoreResult<Vec<Order>> {
        self.fetch_many(None).await
    }

    /// Orders placed by `customer_id`; empty when there are none.
    #[tracing::instrument(skip(self))]
    pub async fn get_all_by_customer(&self, customer_id: &str) -> StoreResult<Vec<Order>> {
        self.fetch_many(Some(customer_id)).await
    }

    /// Strict single-result fetch on both the customer and the order id.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_customer_and_id(
        &self,
        customer_id: &str,
        order_id: &str,
    ) -> StoreResult<Order> {
        self.fetch_one(OrderFilter::CustomerAndId(customer_id, order_id))
            .await?
            .ok_or_else(|| StoreError::not_found("order", order_id))
    }

    async fn fetch_one(&self, filter: OrderFilter<'_>) -> StoreResult<Option<Order>> {
        let session = self.db.begin().await?;
        let result = fetch_order(session.executor(), filter).await;
        complete(session, result).await
    }

    async fn fetch_many(&self, customer: Option<&str>) -> StoreResult<Vec<Order>> {
        let session = self.db.begin().await?;
        let result = fetch_orders(session.executor(), customer).await;
        complete(session, result).await
    }
}

#[derive(Debug, Clone, Copy)]
enum OrderFilter<'a> {
    Id(&'a str),
    CustomerAndId(&'a str, &'a str),
}

async fn insert_order(
    executor: &Executor,
    id: &str,
    description: &str,
    customer: &str,
) -> StoreResult<Order> {
    let mut tx = executor.lock().await;
    let order = sqlx::query_as::<_, Order>(&format!(
        "INSERT INTO orders (id, description, customer) VALUES ($1, $2, $3) \
         RETURNING {ORDER_COLUMNS}"
    ))
    .bind(id)
    .bind(description)
    .bind(customer)
    .fetch_one(tx.conn()?)
    .await?;
    Ok(order)
}

async fn fetch_order(executor: &Executor, filter: OrderFilter<'_>) -> StoreResult<Option<Order>> {
    let mut tx = executor.lock().await;
    let order = match filter {
        OrderFilter::Id(id) => {
            sqlx::query_as::<_, Order>(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"))
                .bind(id)
                .fetch_optional(tx.conn()?)
                .await?
        }
        OrderFilter::CustomerAndId(customer, id) => {
            sqlx::query_as::<_, Order>(&format!(
                "SELECT {ORDER_COLUMNS} FROM orders WHERE customer = $1 AND id = $2"
            ))
            .bind(customer)
            .bind(id)
            .fetch_optional(tx.conn()?)
            .await?
        }
    };
    Ok(order)
}

async fn fetch_orders(executor: &Executor, customer: Option<&str>) -> StoreResult<Vec<Order>> {
    let mut tx = executor.lock().await;
    let orders = match customer {
        Some(customer) => {
            sqlx::query_as::<_, Order>(&format!(
                "SELECT {ORDER_COLUMNS} FROM orders WHERE customer = $1"
            ))
            .bind(customer)
            .fetch_all(tx.conn()?)
            .await?
        }
        None => {
            sqlx::query_as::<_, Order>(&format!("SELECT {ORDER_COLUMNS} FROM orders"))
                .fetch_all(tx.conn()?)
                .await?
        }
    };
    Ok(orders)
}
