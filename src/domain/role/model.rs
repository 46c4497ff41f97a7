/// Named role. Role names are carried as claims in issued tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Role {
    pub id: String,
    pub name: String,
}

pub const ROLE_SUPER_ADMIN: &str = "SuperAdmin";
pub const ROLE_ADMIN: &str = "Admin";
pub const ROLE_CLIENT_COMPANY: &str = "ClientCompany";
pub const ROLE_CUSTOMER: &str = "Customer";

/// Roles seeded on first start.
pub const BUILTIN_ROLES: [&str; 4] = [
    ROLE_SUPER_ADMIN,
    ROLE_ADMIN,
    ROLE_CLIENT_COMPANY,
    ROLE_CUSTOMER,
];
