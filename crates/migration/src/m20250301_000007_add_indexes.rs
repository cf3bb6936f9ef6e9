use sea_orm_migration::prelude::*;

use crate::m20250301_000005_create_package::Package;
use crate::m20250301_000006_create_shipment::Shipment;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Package: lookups by owner
        manager
            .create_index(
                Index::create()
                    .name("idx_package_sender")
                    .table(Package::Table)
                    .col(Package::SenderId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_package_customer")
                    .table(Package::Table)
                    .col(Package::CustomerId)
                    .to_owned(),
            )
            .await?;

        // Shipment: restrict checks on vendor/courier delete scan these
        manager
            .create_index(
                Index::create()
                    .name("idx_shipment_vendor")
                    .table(Shipment::Table)
                    .col(Shipment::VendorId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_shipment_courier")
                    .table(Shipment::Table)
                    .col(Shipment::CourierId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_shipment_status")
                    .table(Shipment::Table)
                    .col(Shipment::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_package_sender").table(Package::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_package_customer").table(Package::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_shipment_vendor").table(Shipment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_shipment_courier").table(Shipment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_shipment_status").table(Shipment::Table).to_owned())
            .await
    }
}
