//! Pick-up / drop-off location entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "locations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub address: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::booking_location::Entity")]
    BookingLocations,
}

impl Related<super::booking_location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookingLocations.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        super::booking_location::Relation::Booking.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::booking_location::Relation::Location.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
