//! SeaORM implementation of RoleRepositoryInterface

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};

use super::db_err;
use crate::domain::{DomainError, DomainResult, Role, RoleRepositoryInterface};
use crate::infrastructure::database::entities::{role, user_role};

pub struct SeaOrmRoleRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn role_model_to_domain(model: role::Model) -> Role {
    Role {
        id: model.id,
        name: model.name,
    }
}

fn duplicate_name(name: &str) -> impl FnOnce(sea_orm::DbErr) -> DomainError + '_ {
    move |e| match db_err(e) {
        DomainError::Conflict(_) => DomainError::Conflict(format!("Role '{name}' already exists")),
        other => other,
    }
}

#[async_trait]
impl RoleRepositoryInterface for SeaOrmRoleRepository {
    async fn list_roles(&self) -> DomainResult<Vec<Role>> {
        let models = role::Entity::find()
            .order_by_asc(role::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(role_model_to_domain).collect())
    }

    async fn get_role_by_id(&self, id: &str) -> DomainResult<Option<Role>> {
        let model = role::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(role_model_to_domain))
    }

    async fn get_role_by_name(&self, name: &str) -> DomainResult<Option<Role>> {
        let model = role::Entity::find()
            .filter(role::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(role_model_to_domain))
    }

    async fn create_role(&self, name: &str) -> DomainResult<Role> {
        debug!("Creating role: {}", name);
        let model = role::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(name.to_string()),
        };
        let stored = model.insert(&self.db).await.map_err(duplicate_name(name))?;
        Ok(role_model_to_domain(stored))
    }

    async fn rename_role(&self, id: &str, new_name: &str) -> DomainResult<Role> {
        debug!("Renaming role {} to {}", id, new_name);
        let existing = role::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Role", "id", id))?;

        let mut active: role::ActiveModel = existing.into();
        active.name = Set(new_name.to_string());
        let stored = active.update(&self.db).await.map_err(duplicate_name(new_name))?;
        Ok(role_model_to_domain(stored))
    }

    async fn delete_role(&self, id: &str) -> DomainResult<()> {
        debug!("Deleting role: {}", id);
        let existing = role::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Role", "id", id))?;
        existing.delete(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn role_names_for_user(&self, user_id: &str) -> DomainResult<Vec<String>> {
        let roles = role::Entity::find()
            .inner_join(user_role::Entity)
            .filter(user_role::Column::UserId.eq(user_id))
            .order_by_asc(role::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(roles.into_iter().map(|r| r.name).collect())
    }

    async fn user_has_role(&self, user_id: &str, role_id: &str) -> DomainResult<bool> {
        let link = user_role::Entity::find_by_id((user_id.to_string(), role_id.to_string()))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(link.is_some())
    }

    async fn assign_role(&self, user_id: &str, role_id: &str) -> DomainResult<()> {
        debug!("Assigning role {} to user {}", role_id, user_id);
        let link = user_role::ActiveModel {
            user_id: Set(user_id.to_string()),
            role_id: Set(role_id.to_string()),
        };
        link.insert(&self.db).await.map_err(|e| match db_err(e) {
            DomainError::Conflict(_) => {
                DomainError::Conflict("User already has this role".to_string())
            }
            other => other,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewUser, UserRepositoryInterface};
    use crate::infrastructure::database::repositories::SeaOrmUserRepository;
    use crate::infrastructure::database::test_database;

    #[tokio::test]
    async fn duplicate_role_name_is_a_conflict() {
        let repo = SeaOrmRoleRepository::new(test_database().await);
        repo.create_role("Dispatcher").await.unwrap();

        let err = repo.create_role("Dispatcher").await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn assigned_roles_are_listed_for_user() {
        let db = test_database().await;
        let roles = SeaOrmRoleRepository::new(db.clone());
        let users = SeaOrmUserRepository::new(db);

        let user = users
            .create_user(NewUser {
                email: "d@example.com".into(),
                password_hash: "x".into(),
                email_confirmed: true,
            })
            .await
            .unwrap();
        let admin = roles.create_role("Admin").await.unwrap();
        let ops = roles.create_role("Ops").await.unwrap();
        roles.assign_role(&user.id, &ops.id).await.unwrap();
        roles.assign_role(&user.id, &admin.id).await.unwrap();

        assert_eq!(
            roles.role_names_for_user(&user.id).await.unwrap(),
            vec!["Admin".to_string(), "Ops".to_string()]
        );
        assert!(roles.user_has_role(&user.id, &ops.id).await.unwrap());

        roles.delete_role(&ops.id).await.unwrap();
        assert_eq!(
            roles.role_names_for_user(&user.id).await.unwrap(),
            vec!["Admin".to_string()]
        );
    }

    #[tokio::test]
    async fn rename_missing_role_is_not_found() {
        let repo = SeaOrmRoleRepository::new(test_database().await);
        let err = repo.rename_role("missing", "X").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
