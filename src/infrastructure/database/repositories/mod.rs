//! Database repository implementations
//!
//! One generic SeaORM repository for the booking catalog plus the identity
//! repositories behind the domain interfaces.

pub mod crud_repository;
pub mod role_repository;
pub mod user_repository;

pub use crud_repository::CrudRepository;
pub use role_repository::SeaOrmRoleRepository;
pub use user_repository::SeaOrmUserRepository;

use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;

/// Classify a database error. Constraint violations become client errors,
/// everything else is a storage fault.
pub(crate) fn db_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            DomainError::Conflict(format!("Record already exists ({detail})"))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            DomainError::Conflict(format!("Record is referenced by other rows ({detail})"))
        }
        // RESTRICT actions report an extended code sea-orm does not classify
        _ if e.to_string().contains("FOREIGN KEY constraint failed") => {
            DomainError::Conflict("Record is referenced by other rows".to_string())
        }
        _ => DomainError::Storage(format!("Database error: {e}")),
    }
}
