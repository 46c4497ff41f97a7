//! Create bookings and the booking ↔ location join table

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_catalog::{
    ClientCompanies, Customers, Drivers, Locations, Vehicles,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Bookings::TotalPrice)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Bookings::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::EndDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::TotalDays)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Bookings::VehicleId).integer().not_null())
                    .col(ColumnDef::new(Bookings::DriverId).integer().not_null())
                    .col(ColumnDef::new(Bookings::CustomerId).integer())
                    .col(ColumnDef::new(Bookings::ClientCompanyId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_vehicle")
                            .from(Bookings::Table, Bookings::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_driver")
                            .from(Bookings::Table, Bookings::DriverId)
                            .to(Drivers::Table, Drivers::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_customer")
                            .from(Bookings::Table, Bookings::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_client_company")
                            .from(Bookings::Table, Bookings::ClientCompanyId)
                            .to(ClientCompanies::Table, ClientCompanies::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_vehicle")
                    .table(Bookings::Table)
                    .col(Bookings::VehicleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_driver")
                    .table(Bookings::Table)
                    .col(Bookings::DriverId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BookingLocations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BookingLocations::BookingId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BookingLocations::LocationId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(BookingLocations::BookingId)
                            .col(BookingLocations::LocationId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_locations_booking")
                            .from(BookingLocations::Table, BookingLocations::BookingId)
                            .to(Bookings::Table, Bookings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_locations_location")
                            .from(BookingLocations::Table, BookingLocations::LocationId)
                            .to(Locations::Table, Locations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BookingLocations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Bookings {
    Table,
    Id,
    TotalPrice,
    StartDate,
    EndDate,
    TotalDays,
    VehicleId,
    DriverId,
    CustomerId,
    ClientCompanyId,
}

#[derive(Iden)]
pub enum BookingLocations {
    Table,
    BookingId,
    LocationId,
}
