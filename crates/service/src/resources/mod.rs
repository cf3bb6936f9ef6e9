//! One service per entity, plus helpers they share.

pub mod courier;
pub mod customer;
pub mod package;
pub mod sender;
pub mod shipment;
pub mod vendor;

use std::sync::Arc;

use models::EntityKind;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, EntityTrait, PrimaryKeyTrait, SqlErr, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::validation::Validator;

pub use courier::CourierService;
pub use customer::CustomerService;
pub use package::{PackageRecord, PackageService};
pub use sender::SenderService;
pub use shipment::{ShipmentRecord, ShipmentService};
pub use vendor::VendorService;

/// Every resource service, wired to one connection and one validator.
#[derive(Clone)]
pub struct Services {
    pub senders: Arc<SenderService>,
    pub customers: Arc<CustomerService>,
    pub vendors: Arc<VendorService>,
    pub couriers: Arc<CourierService>,
    pub packages: Arc<PackageService>,
    pub shipments: Arc<ShipmentService>,
}

impl Services {
    pub fn new(db: DatabaseConnection, validator: Arc<Validator>) -> Self {
        Self {
            senders: Arc::new(SenderService::new(db.clone(), validator.clone())),
            customers: Arc::new(CustomerService::new(db.clone(), validator.clone())),
            vendors: Arc::new(VendorService::new(db.clone(), validator.clone())),
            couriers: Arc::new(CourierService::new(db.clone(), validator.clone())),
            packages: Arc::new(PackageService::new(db.clone(), validator.clone())),
            shipments: Arc::new(ShipmentService::new(db, validator)),
        }
    }
}

pub(crate) async fn find_or_404<E, C>(conn: &C, kind: EntityKind, id: Uuid) -> Result<E::Model, ServiceError>
where
    E: EntityTrait,
    E::Model: Sync,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<Uuid>,
    C: ConnectionTrait,
{
    E::find_by_id(id).one(conn).await?.ok_or_else(|| ServiceError::not_found(kind))
}

/// Delete one row in its own transaction. Cascades declared in the schema
/// apply; a restricting foreign key turns into `Conflict`.
pub(crate) async fn delete_by_id<E>(db: &DatabaseConnection, kind: EntityKind, id: Uuid) -> Result<(), ServiceError>
where
    E: EntityTrait,
    E::Model: Sync,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<Uuid>,
{
    let txn = db.begin().await?;
    find_or_404::<E, _>(&txn, kind, id).await?;
    E::delete_by_id(id).exec(&txn).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => ServiceError::still_referenced(kind),
        _ => ServiceError::from(e),
    })?;
    txn.commit().await?;
    info!(event = "record_deleted", entity = %kind, id = %id);
    Ok(())
}
