//! Schema-level tests: run the real migrations against in-memory SQLite
//! and exercise constraints directly through the entities.


/// Unique indexes and relation loading
pub mod schema_tests;

use anyhow::Result;
use migration::MigratorTrait;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use uuid::Uuid;

use crate::{courier, customer, now, package, sender, shipment, vendor};

/// Fresh in-memory database with every migration applied.
pub(crate) async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub(crate) async fn insert_sender(db: &DatabaseConnection, email: Option<&str>) -> Result<sender::Model> {
    let ts = now();
    let am = sender::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("Sender".into()),
        email: Set(email.map(str::to_string)),
        phone_number: Set(None),
        address: Set(None),
        created_at: Set(ts),
        updated_at: Set(ts),
    };
    Ok(am.insert(db).await?)
}

pub(crate) async fn insert_customer(db: &DatabaseConnection, email: &str) -> Result<customer::Model> {
    let ts = now();
    let am = customer::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("Customer".into()),
        email: Set(email.to_string()),
        phone_number: Set(None),
        address: Set(None),
        created_at: Set(ts),
        updated_at: Set(ts),
    };
    Ok(am.insert(db).await?)
}

pub(crate) async fn insert_vendor(db: &DatabaseConnection) -> Result<vendor::Model> {
    let ts = now();
    let am = vendor::ActiveModel {
        id: Set(Uuid::new_v4()),
        business_name: Set("Vendor".into()),
        license_number: Set(None),
        address: Set(None),
        created_at: Set(ts),
        updated_at: Set(ts),
    };
    Ok(am.insert(db).await?)
}

pub(crate) async fn insert_courier(db: &DatabaseConnection) -> Result<courier::Model> {
    let ts = now();
    let am = courier::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("Courier".into()),
        license_number: Set(None),
        vehicle_type: Set(Some("van".into())),
        phone_number: Set(None),
        created_at: Set(ts),
        updated_at: Set(ts),
    };
    Ok(am.insert(db).await?)
}

pub(crate) async fn insert_package(db: &DatabaseConnection, sender_id: Uuid, customer_id: Uuid) -> Result<package::Model> {
    let ts = now();
    let am = package::ActiveModel {
        id: Set(Uuid::new_v4()),
        sender_id: Set(sender_id),
        customer_id: Set(customer_id),
        weight: Set(2.5),
        package_type: Set("parcel".into()),
        shipping_cost: Set(Decimal::new(1275, 2)),
        receipt_date: Set(chrono::NaiveDate::from_ymd_opt(2025, 5, 30).unwrap()),
        created_at: Set(ts),
        updated_at: Set(ts),
    };
    Ok(am.insert(db).await?)
}

pub(crate) async fn insert_shipment(
    db: &DatabaseConnection,
    package_id: Uuid,
    vendor_id: Uuid,
    courier_id: Uuid,
    tracking_number: &str,
) -> Result<shipment::Model> {
    let ts = now();
    let am = shipment::ActiveModel {
        id: Set(Uuid::new_v4()),
        package_id: Set(package_id),
        vendor_id: Set(vendor_id),
        courier_id: Set(courier_id),
        tracking_number: Set(tracking_number.to_string()),
        delivery_date: Set(None),
        status: Set("Pending".into()),
        created_at: Set(ts),
        updated_at: Set(ts),
    };
    Ok(am.insert(db).await?)
}

/// Sender, customer, vendor, courier, one package and its shipment.
pub(crate) struct Graph {
    pub sender: sender::Model,
    pub customer: customer::Model,
    pub vendor: vendor::Model,
    pub courier: courier::Model,
    pub package: package::Model,
    pub shipment: shipment::Model,
}

pub(crate) async fn insert_graph(db: &DatabaseConnection) -> Result<Graph> {
    let sender = insert_sender(db, None).await?;
    let customer = insert_customer(db, &format!("c_{}@example.com", Uuid::new_v4())).await?;
    let vendor = insert_vendor(db).await?;
    let courier = insert_courier(db).await?;
    let package = insert_package(db, sender.id, customer.id).await?;
    let shipment = insert_shipment(db, package.id, vendor.id, courier.id, &format!("TRK-{}", Uuid::new_v4())).await?;
    Ok(Graph { sender, customer, vendor, courier, package, shipment })
}
