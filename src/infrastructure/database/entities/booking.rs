//! Booking entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Total price in minor currency units
    pub total_price: i64,
    pub start_date: DateTimeUtc,
    pub end_date: DateTimeUtc,
    pub total_days: i32,
    pub vehicle_id: i32,
    pub driver_id: i32,
    pub customer_id: Option<i32>,
    pub client_company_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vehicle::Entity",
        from = "Column::VehicleId",
        to = "super::vehicle::Column::Id"
    )]
    Vehicle,
    #[sea_orm(
        belongs_to = "super::driver::Entity",
        from = "Column::DriverId",
        to = "super::driver::Column::Id"
    )]
    Driver,
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "super::client_company::Entity",
        from = "Column::ClientCompanyId",
        to = "super::client_company::Column::Id"
    )]
    ClientCompany,
    #[sea_orm(has_many = "super::booking_location::Entity")]
    BookingLocations,
}

impl Related<super::vehicle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicle.def()
    }
}

impl Related<super::driver::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Driver.def()
    }
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::client_company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClientCompany.def()
    }
}

impl Related<super::booking_location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookingLocations.def()
    }
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        super::booking_location::Relation::Location.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::booking_location::Relation::Booking.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
