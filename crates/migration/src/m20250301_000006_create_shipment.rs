//! Create `shipment` table.
//!
//! A shipment is owned by its package (cascade) but only references its
//! vendor and courier: those parents cannot be removed while shipments
//! still point at them (restrict).
use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000003_create_vendor::Vendor;
use crate::m20250301_000004_create_courier::Courier;
use crate::m20250301_000005_create_package::Package;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Shipment::Table)
                    .if_not_exists()
                    .col(uuid(Shipment::Id).primary_key())
                    // at most one shipment per package
                    .col(uuid(Shipment::PackageId).unique_key().not_null())
                    .col(uuid(Shipment::VendorId).not_null())
                    .col(uuid(Shipment::CourierId).not_null())
                    .col(string_len(Shipment::TrackingNumber, 255).unique_key().not_null())
                    .col(date_null(Shipment::DeliveryDate))
                    .col(string_len(Shipment::Status, 255).not_null())
                    .col(timestamp_with_time_zone(Shipment::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Shipment::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shipment_package")
                            .from(Shipment::Table, Shipment::PackageId)
                            .to(Package::Table, Package::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shipment_vendor")
                            .from(Shipment::Table, Shipment::VendorId)
                            .to(Vendor::Table, Vendor::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shipment_courier")
                            .from(Shipment::Table, Shipment::CourierId)
                            .to(Courier::Table, Courier::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Shipment::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Shipment {
    Table,
    Id,
    PackageId,
    VendorId,
    CourierId,
    TrackingNumber,
    DeliveryDate,
    Status,
    CreatedAt,
    UpdatedAt,
}
