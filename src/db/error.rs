use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
