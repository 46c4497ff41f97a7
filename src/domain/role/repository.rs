use async_trait::async_trait;

use super::Role;
use crate::domain::DomainResult;

#[async_trait]
pub trait RoleRepositoryInterface: Send + Sync {
    async fn list_roles(&self) -> DomainResult<Vec<Role>>;
    async fn get_role_by_id(&self, id: &str) -> DomainResult<Option<Role>>;
    async fn get_role_by_name(&self, name: &str) -> DomainResult<Option<Role>>;

    async fn create_role(&self, name: &str) -> DomainResult<Role>;
    async fn rename_role(&self, id: &str, new_name: &str) -> DomainResult<Role>;
    async fn delete_role(&self, id: &str) -> DomainResult<()>;

    async fn role_names_for_user(&self, user_id: &str) -> DomainResult<Vec<String>>;
    async fn user_has_role(&self, user_id: &str, role_id: &str) -> DomainResult<bool>;
    async fn assign_role(&self, user_id: &str, role_id: &str) -> DomainResult<()>;
}
