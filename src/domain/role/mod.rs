//! Role aggregate

pub mod model;
pub mod repository;

pub use model::{
    Role, BUILTIN_ROLES, ROLE_ADMIN, ROLE_CLIENT_COMPANY, ROLE_CUSTOMER, ROLE_SUPER_ADMIN,
};
pub use repository::RoleRepositoryInterface;
