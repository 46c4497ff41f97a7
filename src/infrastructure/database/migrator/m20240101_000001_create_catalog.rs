//! Create the catalog tables
//!
//! Vehicles, drivers, client companies, customers and locations. Customers
//! optionally belong to a client company.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vehicles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vehicles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vehicles::Make).string())
                    .col(ColumnDef::new(Vehicles::ModelName).string())
                    .col(ColumnDef::new(Vehicles::GasType).string())
                    .col(ColumnDef::new(Vehicles::MaxLoadKg).integer())
                    .col(ColumnDef::new(Vehicles::Mileage).integer())
                    .col(
                        ColumnDef::new(Vehicles::Seats)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Vehicles::PricePerDay)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Drivers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Drivers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Drivers::FirstName).string())
                    .col(ColumnDef::new(Drivers::LastName).string())
                    .col(ColumnDef::new(Drivers::Dob).date())
                    .col(ColumnDef::new(Drivers::DrivingLicenseNo).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ClientCompanies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClientCompanies::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClientCompanies::Name).string().not_null())
                    .col(ColumnDef::new(ClientCompanies::Address).string())
                    .col(ColumnDef::new(ClientCompanies::Email).string())
                    .col(ColumnDef::new(ClientCompanies::Phone).string())
                    .col(ColumnDef::new(ClientCompanies::ContactName).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Customers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Customers::FirstName).string())
                    .col(ColumnDef::new(Customers::LastName).string())
                    .col(ColumnDef::new(Customers::Dob).date())
                    .col(ColumnDef::new(Customers::Nationality).string())
                    .col(ColumnDef::new(Customers::ClientCompanyId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_customers_client_company")
                            .from(Customers::Table, Customers::ClientCompanyId)
                            .to(ClientCompanies::Table, ClientCompanies::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_customers_client_company")
                    .table(Customers::Table)
                    .col(Customers::ClientCompanyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Locations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Locations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Locations::Name).string().not_null())
                    .col(ColumnDef::new(Locations::Address).string().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Locations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Customers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClientCompanies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Drivers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Vehicles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Vehicles {
    Table,
    Id,
    Make,
    ModelName,
    GasType,
    MaxLoadKg,
    Mileage,
    Seats,
    PricePerDay,
}

#[derive(Iden)]
pub enum Drivers {
    Table,
    Id,
    FirstName,
    LastName,
    Dob,
    DrivingLicenseNo,
}

#[derive(Iden)]
pub enum ClientCompanies {
    Table,
    Id,
    Name,
    Address,
    Email,
    Phone,
    ContactName,
}

#[derive(Iden)]
pub enum Customers {
    Table,
    Id,
    FirstName,
    LastName,
    Dob,
    Nationality,
    ClientCompanyId,
}

#[derive(Iden)]
pub enum Locations {
    Table,
    Id,
    Name,
    Address,
}
