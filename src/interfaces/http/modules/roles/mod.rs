//! `/api/Roles`: role management, Admin only

pub mod dto;
pub mod handlers;

pub use handlers::RoleHandlerState;
