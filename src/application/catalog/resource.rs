//! Per-entity configuration consumed by the generic CRUD layer

use std::fmt::Debug;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    IntoActiveModel, ModelTrait, PrimaryKeyTrait,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::DomainResult;

/// CRUD operation, used to look up the access rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

/// Who may perform an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Any one of the listed role names is enough
    Roles(&'static [&'static str]),
}

impl Access {
    pub fn is_public(&self) -> bool {
        matches!(self, Access::Public)
    }

    pub fn allows(&self, roles: &[String]) -> bool {
        match self {
            Access::Public => true,
            Access::Roles(required) => roles.iter().any(|r| required.contains(&r.as_str())),
        }
    }
}

/// Primary key shape of a resource
pub trait ResourceKey:
    Copy + PartialEq + Debug + DeserializeOwned + Send + Sync + 'static
{
    /// `true` when the database assigns the key on insert
    const SERVER_ASSIGNED: bool;

    /// Path segment(s) addressing the row, e.g. `7` or `3/12`
    fn to_path(&self) -> String;
}

impl ResourceKey for i32 {
    const SERVER_ASSIGNED: bool = true;

    fn to_path(&self) -> String {
        self.to_string()
    }
}

impl ResourceKey for (i32, i32) {
    const SERVER_ASSIGNED: bool = false;

    fn to_path(&self) -> String {
        format!("{}/{}", self.0, self.1)
    }
}

/// Primary key value type of a SeaORM entity
pub type EntityKey<E> = <<E as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

#[async_trait]
pub trait Resource: Send + Sync + 'static {
    type Entity: EntityTrait<Model = Self::Model, ActiveModel = Self::ActiveModel>;
    type Model: ModelTrait<Entity = Self::Entity>
        + FromQueryResult
        + IntoActiveModel<Self::ActiveModel>
        + Serialize
        + Clone
        + Send
        + Sync
        + 'static;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity>
        + ActiveModelBehavior
        + Send
        + 'static;
    type Key: ResourceKey + Into<EntityKey<Self::Entity>>;
    type Payload: DeserializeOwned + Validate + ToSchema + Send + Sync + 'static;

    /// Singular name used in messages and as the route segment
    const NAME: &'static str;

    /// Route template addressing one row
    const KEY_SEGMENTS: &'static str = "{id}";

    fn model_key(model: &Self::Model) -> Self::Key;

    /// Key carried in a request body, if any
    fn payload_key(payload: &Self::Payload) -> Option<Self::Key>;

    /// Build a full active model. `key` is `None` on insert of a
    /// server-keyed row.
    fn into_active_model(payload: Self::Payload, key: Option<Self::Key>) -> Self::ActiveModel;

    /// Check that rows referenced by the payload exist
    async fn verify_references(
        _db: &DatabaseConnection,
        _payload: &Self::Payload,
    ) -> DomainResult<()> {
        Ok(())
    }

    fn access(_op: Operation) -> Access {
        Access::Public
    }

    fn path() -> String {
        format!("/api/{}", Self::NAME)
    }

    fn location(key: &Self::Key) -> String {
        format!("{}/{}", Self::path(), key.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_access_needs_one_matching_role() {
        let access = Access::Roles(&["SuperAdmin", "Admin"]);
        assert!(access.allows(&["Customer".into(), "Admin".into()]));
        assert!(!access.allows(&["Customer".into()]));
        assert!(!access.allows(&[]));
        assert!(Access::Public.allows(&[]));
    }

    #[test]
    fn keys_render_as_path_segments() {
        assert_eq!(7.to_path(), "7");
        assert_eq!((3, 12).to_path(), "3/12");
        assert!(<i32 as ResourceKey>::SERVER_ASSIGNED);
        assert!(!<(i32, i32) as ResourceKey>::SERVER_ASSIGNED);
    }
}
