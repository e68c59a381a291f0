/// Error type for storage and entity operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Session transaction already completed")]
    SessionClosed,

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_foreign_key_violation()
                || db_err.is_unique_violation()
                || db_err.is_check_violation()
            {
                return Self::Constraint(db_err.message().to_string());
            }
        }
        Self::Database(err)
    }
}

/// Result type for storage and entity operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = StoreError::not_found("user", "abc");
        assert_eq!(err.to_string(), "user abc not found");
    }

    #[test]
    fn non_database_errors_stay_database_errors() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Database(sqlx::Error::RowNotFound)));
    }
}
