//! Identity use-cases: accounts, email verification, login and roles

pub mod account_service;
pub mod role_service;

pub use account_service::{AccountService, AccountSettings, AuthResult};
pub use role_service::RoleService;
