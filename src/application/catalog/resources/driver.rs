use chrono::NaiveDate;
use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::catalog::Resource;
use crate::infrastructure::database::entities::driver;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct DriverPayload {
    #[serde(default)]
    pub id: Option<i32>,
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    pub dob: Option<NaiveDate>,
    #[validate(length(max = 50))]
    pub driving_license_no: Option<String>,
}

pub struct DriverResource;

impl Resource for DriverResource {
    type Entity = driver::Entity;
    type Model = driver::Model;
    type ActiveModel = driver::ActiveModel;
    type Key = i32;
    type Payload = DriverPayload;

    const NAME: &'static str = "Driver";

    fn model_key(model: &driver::Model) -> i32 {
        model.id
    }

    fn payload_key(payload: &DriverPayload) -> Option<i32> {
        payload.id
    }

    fn into_active_model(p: DriverPayload, key: Option<i32>) -> driver::ActiveModel {
        driver::ActiveModel {
            id: key.map_or(NotSet, Set),
            first_name: Set(p.first_name),
            last_name: Set(p.last_name),
            dob: Set(p.dob),
            driving_license_no: Set(p.driving_license_no),
        }
    }
}
