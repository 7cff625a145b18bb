use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Insumos(#[from] serde_json::Error),

    /// Raised by the in-memory store, worded like the Postgres error.
    #[error("null value in column \"{column}\" of relation \"{table}\" violates not-null constraint")]
    NotNull {
        table: &'static str,
        column: &'static str,
    },
}

impl StoreError {
    /// The raw text shown to clients.
    ///
    /// For errors reported by the server this is the Postgres message alone,
    /// without the driver's "error returned from database" prefix.
    pub fn message(&self) -> String {
        match self {
            StoreError::Database(err) => match err.as_database_error() {
                Some(db_err) => db_err.message().to_string(),
                None => err.to_string(),
            },
            other => other.to_string(),
        }
    }
}
