use shared::ValidationError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Name already taken: {0}")]
    DuplicateName(String),
    #[error("Record not found: {0}")]
    NotFound(Uuid),
    #[error("Stored record failed validation: {0}")]
    Validation(#[from] ValidationError),
}
