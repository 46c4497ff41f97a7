//! First-start seeding of the identity tables

use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use super::repositories::{SeaOrmRoleRepository, SeaOrmUserRepository};
use crate::config::AdminConfig;
use crate::domain::role::{ROLE_ADMIN, ROLE_SUPER_ADMIN};
use crate::domain::{
    DomainError, DomainResult, NewUser, RoleRepositoryInterface, UserRepositoryInterface,
    BUILTIN_ROLES,
};
use crate::infrastructure::crypto::hash_password;

/// Create the built-in roles that are missing and, on an empty user table,
/// a confirmed default administrator holding SuperAdmin and Admin.
pub async fn seed_identity(db: &DatabaseConnection, admin: &AdminConfig) -> DomainResult<()> {
    let roles = SeaOrmRoleRepository::new(db.clone());
    let users = SeaOrmUserRepository::new(db.clone());

    for name in BUILTIN_ROLES {
        if roles.get_role_by_name(name).await?.is_none() {
            roles.create_role(name).await?;
            info!("Seeded role {}", name);
        }
    }

    if users.count_users().await? > 0 {
        return Ok(());
    }

    info!("Creating default admin user...");
    let password_hash = hash_password(&admin.password)
        .map_err(|e| DomainError::Storage(format!("Failed to hash admin password: {e}")))?;
    let user = users
        .create_user(NewUser {
            email: admin.email.clone(),
            password_hash,
            email_confirmed: true,
        })
        .await?;

    for name in [ROLE_SUPER_ADMIN, ROLE_ADMIN] {
        let role = roles
            .get_role_by_name(name)
            .await?
            .ok_or_else(|| DomainError::not_found("Role", "name", name))?;
        roles.assign_role(&user.id, &role.id).await?;
    }

    info!("Default admin created: {}", admin.email);
    warn!("Please change the default admin password");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_database;

    #[tokio::test]
    async fn seeding_twice_is_idempotent() {
        let db = test_database().await;
        let admin = AdminConfig::default();

        seed_identity(&db, &admin).await.unwrap();
        seed_identity(&db, &admin).await.unwrap();

        let roles = SeaOrmRoleRepository::new(db.clone());
        let users = SeaOrmUserRepository::new(db);
        assert_eq!(roles.list_roles().await.unwrap().len(), BUILTIN_ROLES.len());
        assert_eq!(users.count_users().await.unwrap(), 1);

        let stored = users.get_user_by_email(&admin.email).await.unwrap().unwrap();
        assert!(stored.email_confirmed);
        assert_eq!(
            roles.role_names_for_user(&stored.id).await.unwrap(),
            vec![ROLE_ADMIN.to_string(), ROLE_SUPER_ADMIN.to_string()]
        );
    }
}
