//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid position: {0}. Must be: header, sidebar, or footer")]
    InvalidPosition(String),

    #[error("Menu not found: {0}")]
    MenuNotFound(i64),

    #[error("Cannot delete fixed menu {0}")]
    FixedMenuProtected(i64),

    #[error("Cannot delete menu {id}: descendant {descendant_id} is fixed")]
    FixedDescendantProtected { id: i64, descendant_id: i64 },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
