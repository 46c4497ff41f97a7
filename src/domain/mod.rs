//! Domain layer
//!
//! Identity aggregates (users, roles), their repository interfaces and the
//! shared error type. Booking-side aggregates are plain SeaORM rows handled by
//! the generic catalog layer and have no domain counterpart.

pub mod error;
pub mod role;
pub mod user;

pub use error::{DomainError, DomainResult, InfraError};
pub use role::{Role, RoleRepositoryInterface, BUILTIN_ROLES};
pub use user::{NewUser, User, UserRepositoryInterface, VerificationToken};
