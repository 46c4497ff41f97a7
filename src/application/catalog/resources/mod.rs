//! Resource configurations for the catalog tables

mod booking;
mod booking_location;
mod client_company;
mod customer;
mod driver;
mod location;
mod vehicle;

pub use booking::{BookingPayload, BookingResource};
pub use booking_location::{BookingLocationPayload, BookingLocationResource};
pub use client_company::{ClientCompanyPayload, ClientCompanyResource};
pub use customer::{CustomerPayload, CustomerResource};
pub use driver::{DriverPayload, DriverResource};
pub use location::{LocationPayload, LocationResource};
pub use vehicle::{VehiclePayload, VehicleResource};

use sea_orm::{DatabaseConnection, EntityTrait};

use super::resource::EntityKey;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::repositories::db_err;

/// Fail with a validation error when the referenced row is missing
pub(crate) async fn ensure_exists<E>(
    db: &DatabaseConnection,
    entity: &'static str,
    id: i32,
) -> DomainResult<()>
where
    E: EntityTrait,
    i32: Into<EntityKey<E>>,
{
    let found = E::find_by_id(id).one(db).await.map_err(db_err)?;
    if found.is_none() {
        return Err(DomainError::Validation(format!(
            "{entity} {id} does not exist"
        )));
    }
    Ok(())
}
