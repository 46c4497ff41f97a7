//! `/api/Account`: registration, email verification, login and logout

pub mod dto;
pub mod handlers;

pub use handlers::AccountHandlerState;
