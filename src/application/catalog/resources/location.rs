use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::catalog::{Access, Operation, Resource};
use crate::domain::role::{ROLE_ADMIN, ROLE_SUPER_ADMIN};
use crate::infrastructure::database::entities::location;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LocationPayload {
    #[serde(default)]
    pub id: Option<i32>,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 500))]
    pub address: String,
}

pub struct LocationResource;

impl Resource for LocationResource {
    type Entity = location::Entity;
    type Model = location::Model;
    type ActiveModel = location::ActiveModel;
    type Key = i32;
    type Payload = LocationPayload;

    const NAME: &'static str = "Location";

    fn model_key(model: &location::Model) -> i32 {
        model.id
    }

    fn payload_key(payload: &LocationPayload) -> Option<i32> {
        payload.id
    }

    fn into_active_model(p: LocationPayload, key: Option<i32>) -> location::ActiveModel {
        location::ActiveModel {
            id: key.map_or(NotSet, Set),
            name: Set(p.name),
            address: Set(p.address),
        }
    }

    fn access(_op: Operation) -> Access {
        Access::Roles(&[ROLE_SUPER_ADMIN, ROLE_ADMIN])
    }
}
