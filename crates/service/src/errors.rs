use models::EntityKind;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use tracing::warn;

use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(ValidationErrors),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found(kind: EntityKind) -> Self { Self::NotFound(format!("{} not found", kind.label())) }

    /// Delete rejected because other rows still reference the record.
    pub fn still_referenced(kind: EntityKind) -> Self {
        Self::Conflict(format!(
            "Failed to delete {}. It is still associated with existing records.",
            kind.label().to_lowercase()
        ))
    }
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        // constraint races lost at write time; the detail stays in the log
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) | Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                warn!(event = "constraint_conflict", %detail);
                Self::Conflict("The request conflicts with existing records.".into())
            }
            _ => Self::Db(err.to_string()),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errs: ValidationErrors) -> Self { Self::Validation(errs) }
}
