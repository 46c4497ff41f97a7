//! Customer entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub dob: Option<Date>,
    pub nationality: Option<String>,
    pub client_company_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::client_company::Entity",
        from = "Column::ClientCompanyId",
        to = "super::client_company::Column::Id"
    )]
    ClientCompany,
    #[sea_orm(has_many = "super::booking::Entity")]
    Bookings,
}

impl Related<super::client_company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClientCompany.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
