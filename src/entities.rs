use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

/// A stored user. `created_at` is assigned by the database on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub created_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            surname: row.try_get("surname")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// A stored order; `customer` references `users.id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: String,
    pub description: String,
    pub customer: String,
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            description: row.try_get("description")?,
            customer: row.try_get("customer")?,
        })
    }
}

/// Fresh opaque identity for a new record.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
