use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, NotSet, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::ensure_exists;
use crate::application::catalog::Resource;
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{
    booking, client_company, customer, driver, vehicle,
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_period"))]
pub struct BookingPayload {
    #[serde(default)]
    pub id: Option<i32>,
    /// Minor currency units
    #[validate(range(min = 0))]
    pub total_price: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[validate(range(min = 0))]
    pub total_days: i32,
    pub vehicle_id: i32,
    pub driver_id: i32,
    #[serde(default)]
    pub customer_id: Option<i32>,
    #[serde(default)]
    pub client_company_id: Option<i32>,
}

fn validate_period(p: &BookingPayload) -> Result<(), ValidationError> {
    if p.end_date < p.start_date {
        let mut err = ValidationError::new("period");
        err.message = Some("end_date must not precede start_date".into());
        return Err(err);
    }
    Ok(())
}

pub struct BookingResource;

#[async_trait]
impl Resource for BookingResource {
    type Entity = booking::Entity;
    type Model = booking::Model;
    type ActiveModel = booking::ActiveModel;
    type Key = i32;
    type Payload = BookingPayload;

    const NAME: &'static str = "Booking";

    fn model_key(model: &booking::Model) -> i32 {
        model.id
    }

    fn payload_key(payload: &BookingPayload) -> Option<i32> {
        payload.id
    }

    fn into_active_model(p: BookingPayload, key: Option<i32>) -> booking::ActiveModel {
        booking::ActiveModel {
            id: key.map_or(NotSet, Set),
            total_price: Set(p.total_price),
            start_date: Set(p.start_date),
            end_date: Set(p.end_date),
            total_days: Set(p.total_days),
            vehicle_id: Set(p.vehicle_id),
            driver_id: Set(p.driver_id),
            customer_id: Set(p.customer_id),
            client_company_id: Set(p.client_company_id),
        }
    }

    async fn verify_references(db: &DatabaseConnection, p: &BookingPayload) -> DomainResult<()> {
        ensure_exists::<vehicle::Entity>(db, "Vehicle", p.vehicle_id).await?;
        ensure_exists::<driver::Entity>(db, "Driver", p.driver_id).await?;
        if let Some(id) = p.customer_id {
            ensure_exists::<customer::Entity>(db, "Customer", id).await?;
        }
        if let Some(id) = p.client_company_id {
            ensure_exists::<client_company::Entity>(db, "ClientCompany", id).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn payload(days: i64) -> BookingPayload {
        let start = Utc::now();
        BookingPayload {
            id: None,
            total_price: 10_000,
            start_date: start,
            end_date: start + Duration::days(days),
            total_days: days as i32,
            vehicle_id: 1,
            driver_id: 1,
            customer_id: None,
            client_company_id: None,
        }
    }

    #[test]
    fn end_before_start_is_rejected() {
        assert!(payload(2).validate().is_ok());
        assert!(payload(0).validate().is_ok());

        let mut bad = payload(1);
        bad.end_date = bad.start_date - Duration::hours(1);
        assert!(bad.validate().is_err());
    }
}
