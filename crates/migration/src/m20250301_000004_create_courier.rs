//! Create `courier` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Courier::Table)
                    .if_not_exists()
                    .col(uuid(Courier::Id).primary_key())
                    .col(string_len(Courier::Name, 255).not_null())
                    .col(string_len_null(Courier::LicenseNumber, 255).unique_key())
                    .col(string_len_null(Courier::VehicleType, 255))
                    .col(string_len_null(Courier::PhoneNumber, 20))
                    .col(timestamp_with_time_zone(Courier::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Courier::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Courier::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Courier { Table, Id, Name, LicenseNumber, VehicleType, PhoneNumber, CreatedAt, UpdatedAt }
