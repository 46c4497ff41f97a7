//! Role management and role assignment

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    DomainError, DomainResult, Role, RoleRepositoryInterface, UserRepositoryInterface,
};

pub struct RoleService<U: UserRepositoryInterface, R: RoleRepositoryInterface> {
    users: Arc<U>,
    roles: Arc<R>,
}

impl<U: UserRepositoryInterface, R: RoleRepositoryInterface> RoleService<U, R> {
    pub fn new(users: Arc<U>, roles: Arc<R>) -> Self {
        Self { users, roles }
    }

    fn clean_name(name: &str) -> DomainResult<&str> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("Role name must not be empty".into()));
        }
        Ok(name)
    }

    pub async fn list_roles(&self) -> DomainResult<Vec<Role>> {
        self.roles.list_roles().await
    }

    pub async fn get_role(&self, id: &str) -> DomainResult<Role> {
        self.roles
            .get_role_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Role", "id", id))
    }

    pub async fn create_role(&self, name: &str) -> DomainResult<Role> {
        let name = Self::clean_name(name)?;
        if self.roles.get_role_by_name(name).await?.is_some() {
            return Err(DomainError::Conflict(format!("Role '{name}' already exists")));
        }
        let role = self.roles.create_role(name).await?;
        info!(role_id = %role.id, name = %role.name, "Role created");
        Ok(role)
    }

    pub async fn rename_role(&self, id: &str, new_name: &str) -> DomainResult<Role> {
        let new_name = Self::clean_name(new_name)?;
        let role = self.roles.rename_role(id, new_name).await?;
        info!(role_id = %role.id, name = %role.name, "Role renamed");
        Ok(role)
    }

    pub async fn delete_role(&self, id: &str) -> DomainResult<()> {
        self.roles.delete_role(id).await?;
        info!(role_id = %id, "Role deleted");
        Ok(())
    }

    pub async fn assign_role_to_user(&self, user_id: &str, role_name: &str) -> DomainResult<()> {
        let user = self
            .users
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", user_id))?;
        let role = self
            .roles
            .get_role_by_name(role_name.trim())
            .await?
            .ok_or_else(|| DomainError::not_found("Role", "name", role_name))?;

        if self.roles.user_has_role(&user.id, &role.id).await? {
            return Err(DomainError::Conflict(format!(
                "User already has role '{}'",
                role.name
            )));
        }
        self.roles.assign_role(&user.id, &role.id).await?;
        info!(user_id = %user.id, role = %role.name, "Role assigned");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewUser;
    use crate::infrastructure::database::repositories::{
        SeaOrmRoleRepository, SeaOrmUserRepository,
    };
    use crate::infrastructure::database::test_database;

    async fn service() -> (
        RoleService<SeaOrmUserRepository, SeaOrmRoleRepository>,
        Arc<SeaOrmUserRepository>,
    ) {
        let db = test_database().await;
        let users = Arc::new(SeaOrmUserRepository::new(db.clone()));
        let roles = Arc::new(SeaOrmRoleRepository::new(db));
        (RoleService::new(users.clone(), roles), users)
    }

    #[tokio::test]
    async fn blank_role_name_is_invalid() {
        let (svc, _) = service().await;
        let err = svc.create_role("   ").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn assigning_twice_is_a_conflict() {
        let (svc, users) = service().await;
        let user = users
            .create_user(NewUser {
                email: "a@example.com".into(),
                password_hash: "x".into(),
                email_confirmed: true,
            })
            .await
            .unwrap();
        svc.create_role("Customer").await.unwrap();

        svc.assign_role_to_user(&user.id, "Customer").await.unwrap();
        let err = svc.assign_role_to_user(&user.id, "Customer").await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn assigning_to_unknown_user_or_role_is_not_found() {
        let (svc, users) = service().await;
        svc.create_role("Customer").await.unwrap();
        let err = svc.assign_role_to_user("ghost", "Customer").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        let user = users
            .create_user(NewUser {
                email: "b@example.com".into(),
                password_hash: "x".into(),
                email_confirmed: true,
            })
            .await
            .unwrap();
        let err = svc.assign_role_to_user(&user.id, "Pilot").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
