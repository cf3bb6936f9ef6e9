use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use models::{courier, now, package, shipment, vendor, EntityKind};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, LoaderTrait, ModelTrait, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{delete_by_id, find_or_404};
use crate::errors::ServiceError;
use crate::resource::ResourceService;
use crate::validation::{present, FieldRules, Input, Mode, Schema, Validator};

pub fn schema() -> Schema {
    Schema::new(
        EntityKind::Shipment,
        vec![
            FieldRules::new("package_id")
                .required()
                .uuid()
                .exists(EntityKind::Package)
                .unique(EntityKind::Shipment, "package_id"),
            FieldRules::new("vendor_id").required().uuid().exists(EntityKind::Vendor),
            FieldRules::new("courier_id").required().uuid().exists(EntityKind::Courier),
            FieldRules::new("tracking_number")
                .required()
                .string()
                .max(255)
                .unique(EntityKind::Shipment, "tracking_number"),
            FieldRules::new("delivery_date").nullable().date(),
            FieldRules::new("status").required().string().max(255),
        ],
    )
}

/// Shipment with its package, vendor and courier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipmentRecord {
    #[serde(flatten)]
    pub shipment: shipment::Model,
    pub package: Option<package::Model>,
    pub vendor: Option<vendor::Model>,
    pub courier: Option<courier::Model>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateShipment {
    pub package_id: Uuid,
    pub vendor_id: Uuid,
    pub courier_id: Uuid,
    pub tracking_number: String,
    #[serde(default)]
    pub delivery_date: Option<NaiveDate>,
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateShipment {
    #[serde(default)]
    pub package_id: Option<Uuid>,
    #[serde(default)]
    pub vendor_id: Option<Uuid>,
    #[serde(default)]
    pub courier_id: Option<Uuid>,
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub delivery_date: Option<Option<NaiveDate>>,
    #[serde(default)]
    pub status: Option<String>,
}

impl UpdateShipment {
    fn is_empty(&self) -> bool {
        self.package_id.is_none()
            && self.vendor_id.is_none()
            && self.courier_id.is_none()
            && self.tracking_number.is_none()
            && self.delivery_date.is_none()
            && self.status.is_none()
    }
}

async fn with_relations<C: ConnectionTrait>(conn: &C, shipments: Vec<shipment::Model>) -> Result<Vec<ShipmentRecord>, DbErr> {
    let packages = shipments.load_one(package::Entity, conn).await?;
    let vendors = shipments.load_one(vendor::Entity, conn).await?;
    let couriers = shipments.load_one(courier::Entity, conn).await?;
    Ok(shipments
        .into_iter()
        .zip(packages)
        .zip(vendors)
        .zip(couriers)
        .map(|(((shipment, package), vendor), courier)| ShipmentRecord { shipment, package, vendor, courier })
        .collect())
}

async fn load<C: ConnectionTrait>(conn: &C, shipment: shipment::Model) -> Result<ShipmentRecord, DbErr> {
    let package = shipment.find_related(package::Entity).one(conn).await?;
    let vendor = shipment.find_related(vendor::Entity).one(conn).await?;
    let courier = shipment.find_related(courier::Entity).one(conn).await?;
    Ok(ShipmentRecord { shipment, package, vendor, courier })
}

#[derive(Clone)]
pub struct ShipmentService {
    db: DatabaseConnection,
    validator: Arc<Validator>,
}

impl ShipmentService {
    pub fn new(db: DatabaseConnection, validator: Arc<Validator>) -> Self { Self { db, validator } }
}

#[async_trait]
impl ResourceService for ShipmentService {
    const KIND: EntityKind = EntityKind::Shipment;
    type Record = ShipmentRecord;

    async fn list(&self) -> Result<Vec<ShipmentRecord>, ServiceError> {
        let shipments = shipment::Entity::find().order_by_asc(shipment::Column::CreatedAt).all(&self.db).await?;
        Ok(with_relations(&self.db, shipments).await?)
    }

    async fn get(&self, id: Uuid) -> Result<ShipmentRecord, ServiceError> {
        let found = find_or_404::<shipment::Entity, _>(&self.db, Self::KIND, id).await?;
        Ok(load(&self.db, found).await?)
    }

    #[instrument(skip(self, input))]
    async fn create(&self, input: Input) -> Result<ShipmentRecord, ServiceError> {
        let txn = self.db.begin().await?;
        let data: CreateShipment = self.validator.validate_into(&txn, &schema(), &input, Mode::Create).await?;
        let ts = now();
        let created = shipment::ActiveModel {
            id: Set(Uuid::new_v4()),
            package_id: Set(data.package_id),
            vendor_id: Set(data.vendor_id),
            courier_id: Set(data.courier_id),
            tracking_number: Set(data.tracking_number),
            delivery_date: Set(data.delivery_date),
            status: Set(data.status),
            created_at: Set(ts),
            updated_at: Set(ts),
        }
        .insert(&txn)
        .await?;
        let record = load(&txn, created).await?;
        txn.commit().await?;
        info!(
            event = "shipment_created",
            id = %record.shipment.id,
            package_id = %record.shipment.package_id,
            tracking_number = %record.shipment.tracking_number
        );
        Ok(record)
    }

    #[instrument(skip(self, input), fields(id = %id))]
    async fn update(&self, id: Uuid, input: Input) -> Result<ShipmentRecord, ServiceError> {
        let txn = self.db.begin().await?;
        let existing = find_or_404::<shipment::Entity, _>(&txn, Self::KIND, id).await?;
        let data: UpdateShipment = self.validator.validate_into(&txn, &schema(), &input, Mode::Update { id }).await?;
        if data.is_empty() {
            let record = load(&txn, existing).await?;
            txn.commit().await?;
            return Ok(record);
        }

        let mut am: shipment::ActiveModel = existing.into();
        if let Some(package_id) = data.package_id { am.package_id = Set(package_id); }
        if let Some(vendor_id) = data.vendor_id { am.vendor_id = Set(vendor_id); }
        if let Some(courier_id) = data.courier_id { am.courier_id = Set(courier_id); }
        if let Some(tracking_number) = data.tracking_number { am.tracking_number = Set(tracking_number); }
        if let Some(delivery_date) = data.delivery_date { am.delivery_date = Set(delivery_date); }
        if let Some(status) = data.status { am.status = Set(status); }
        am.updated_at = Set(now());
        let updated = am.update(&txn).await?;
        let record = load(&txn, updated).await?;
        txn.commit().await?;
        info!(event = "shipment_updated", id = %id, status = %record.shipment.status);
        Ok(record)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        delete_by_id::<shipment::Entity>(&self.db, Self::KIND, id).await
    }
}
