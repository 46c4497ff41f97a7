//! User aggregate
//!
//! Contains the User entity, the verification token record, and the
//! repository interface.

pub mod model;
pub mod repository;

pub use model::{NewUser, User, VerificationToken};
pub use repository::UserRepositoryInterface;
