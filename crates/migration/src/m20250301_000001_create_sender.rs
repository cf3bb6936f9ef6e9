//! Create `sender` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sender::Table)
                    .if_not_exists()
                    .col(uuid(Sender::Id).primary_key())
                    .col(string_len(Sender::Name, 255).not_null())
                    .col(string_len_null(Sender::Email, 255).unique_key())
                    .col(string_len_null(Sender::PhoneNumber, 20))
                    .col(text_null(Sender::Address))
                    .col(timestamp_with_time_zone(Sender::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Sender::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Sender::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Sender { Table, Id, Name, Email, PhoneNumber, Address, CreatedAt, UpdatedAt }
