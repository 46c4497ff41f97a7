//! Application layer - use cases
//!
//! - `catalog`: generic CRUD over the booking tables
//! - `identity`: accounts, login and roles

pub mod catalog;
pub mod identity;

pub use catalog::CrudService;
pub use identity::{AccountService, AccountSettings, AuthResult, RoleService};
