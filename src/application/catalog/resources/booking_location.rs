use async_trait::async_trait;
use sea_orm::{DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::ensure_exists;
use crate::application::catalog::Resource;
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{booking, booking_location, location};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookingLocationPayload {
    pub booking_id: i32,
    pub location_id: i32,
}

/// Join rows keyed by `(booking_id, location_id)`
pub struct BookingLocationResource;

#[async_trait]
impl Resource for BookingLocationResource {
    type Entity = booking_location::Entity;
    type Model = booking_location::Model;
    type ActiveModel = booking_location::ActiveModel;
    type Key = (i32, i32);
    type Payload = BookingLocationPayload;

    const NAME: &'static str = "BookingLocation";
    const KEY_SEGMENTS: &'static str = "{booking_id}/{location_id}";

    fn model_key(model: &booking_location::Model) -> (i32, i32) {
        (model.booking_id, model.location_id)
    }

    fn payload_key(payload: &BookingLocationPayload) -> Option<(i32, i32)> {
        Some((payload.booking_id, payload.location_id))
    }

    fn into_active_model(
        p: BookingLocationPayload,
        _key: Option<(i32, i32)>,
    ) -> booking_location::ActiveModel {
        booking_location::ActiveModel {
            booking_id: Set(p.booking_id),
            location_id: Set(p.location_id),
        }
    }

    async fn verify_references(
        db: &DatabaseConnection,
        p: &BookingLocationPayload,
    ) -> DomainResult<()> {
        ensure_exists::<booking::Entity>(db, "Booking", p.booking_id).await?;
        ensure_exists::<location::Entity>(db, "Location", p.location_id).await
    }
}
