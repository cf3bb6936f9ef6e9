//! Migrator registering entity-specific migrations in dependency order:
//! parents (sender, customer, vendor, courier) before children
//! (package, shipment). Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_sender;
mod m20250301_000002_create_customer;
mod m20250301_000003_create_vendor;
mod m20250301_000004_create_courier;
mod m20250301_000005_create_package;
mod m20250301_000006_create_shipment;
mod m20250301_000007_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_sender::Migration),
            Box::new(m20250301_000002_create_customer::Migration),
            Box::new(m20250301_000003_create_vendor::Migration),
            Box::new(m20250301_000004_create_courier::Migration),
            Box::new(m20250301_000005_create_package::Migration),
            Box::new(m20250301_000006_create_shipment::Migration),
            // Indexes should always be applied last
            Box::new(m20250301_000007_add_indexes::Migration),
        ]
    }
}
