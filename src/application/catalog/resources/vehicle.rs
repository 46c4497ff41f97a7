use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::catalog::Resource;
use crate::infrastructure::database::entities::vehicle;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct VehiclePayload {
    /// Ignored on create, must match the path on update
    #[serde(default)]
    pub id: Option<i32>,
    #[validate(length(max = 100))]
    pub make: Option<String>,
    #[serde(alias = "model")]
    #[validate(length(max = 100))]
    pub model_name: Option<String>,
    #[validate(length(max = 50))]
    pub gas_type: Option<String>,
    #[validate(range(min = 0))]
    pub max_load_kg: Option<i32>,
    #[validate(range(min = 0))]
    pub mileage: Option<i32>,
    #[validate(range(min = 1, max = 100))]
    pub seats: i32,
    /// Minor currency units
    #[validate(range(min = 0))]
    pub price_per_day: i64,
}

pub struct VehicleResource;

impl Resource for VehicleResource {
    type Entity = vehicle::Entity;
    type Model = vehicle::Model;
    type ActiveModel = vehicle::ActiveModel;
    type Key = i32;
    type Payload = VehiclePayload;

    const NAME: &'static str = "Vehicle";

    fn model_key(model: &vehicle::Model) -> i32 {
        model.id
    }

    fn payload_key(payload: &VehiclePayload) -> Option<i32> {
        payload.id
    }

    fn into_active_model(p: VehiclePayload, key: Option<i32>) -> vehicle::ActiveModel {
        vehicle::ActiveModel {
            id: key.map_or(NotSet, Set),
            make: Set(p.make),
            model_name: Set(p.model_name),
            gas_type: Set(p.gas_type),
            max_load_kg: Set(p.max_load_kg),
            mileage: Set(p.mileage),
            seats: Set(p.seats),
            price_per_day: Set(p.price_per_day),
        }
    }
}
