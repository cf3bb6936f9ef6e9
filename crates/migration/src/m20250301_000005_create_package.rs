//! Create `package` table.
//!
//! Packages belong to a sender and a customer; removing either parent
//! removes the package (and, through `shipment.package_id`, its shipment).
use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_create_sender::Sender;
use crate::m20250301_000002_create_customer::Customer;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Package::Table)
                    .if_not_exists()
                    .col(uuid(Package::Id).primary_key())
                    .col(uuid(Package::SenderId).not_null())
                    .col(uuid(Package::CustomerId).not_null())
                    .col(double(Package::Weight).not_null())
                    .col(string_len(Package::PackageType, 50).not_null())
                    .col(decimal_len(Package::ShippingCost, 10, 2).not_null())
                    .col(date(Package::ReceiptDate).not_null())
                    .col(timestamp_with_time_zone(Package::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Package::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_package_sender")
                            .from(Package::Table, Package::SenderId)
                            .to(Sender::Table, Sender::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_package_customer")
                            .from(Package::Table, Package::CustomerId)
                            .to(Customer::Table, Customer::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Package::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Package {
    Table,
    Id,
    SenderId,
    CustomerId,
    Weight,
    PackageType,
    ShippingCost,
    ReceiptDate,
    CreatedAt,
    UpdatedAt,
}
