use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use models::{customer, now, package, sender, EntityKind};
use rust_decimal::Decimal;
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
use crate::validation::{FieldRules, Input, Mode, Schema, Validator};

pub fn schema() -> Schema {
    Schema::new(
        EntityKind::Package,
        vec![
            FieldRules::new("sender_id").required().uuid().exists(EntityKind::Sender),
            FieldRules::new("customer_id").required().uuid().exists(EntityKind::Customer),
            FieldRules::new("weight").required().numeric(),
            FieldRules::new("package_type").required().string().max(50),
            FieldRules::new("shipping_cost").required().decimal(10, 2),
            FieldRules::new("receipt_date").required().date(),
        ],
    )
}

/// Package with its sender and customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageRecord {
    #[serde(flatten)]
    pub package: package::Model,
    pub sender: Option<sender::Model>,
    pub customer: Option<customer::Model>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePackage {
    pub sender_id: Uuid,
    pub customer_id: Uuid,
    pub weight: f64,
    pub package_type: String,
    pub shipping_cost: Decimal,
    pub receipt_date: NaiveDate,
}

/// Every field is required, so a present field is never null here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePackage {
    #[serde(default)]
    pub sender_id: Option<Uuid>,
    #[serde(default)]
    pub customer_id: Option<Uuid>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub package_type: Option<String>,
    #[serde(default)]
    pub shipping_cost: Option<Decimal>,
    #[serde(default)]
    pub receipt_date: Option<NaiveDate>,
}

impl UpdatePackage {
    fn is_empty(&self) -> bool {
        self.sender_id.is_none()
            && self.customer_id.is_none()
            && self.weight.is_none()
            && self.package_type.is_none()
            && self.shipping_cost.is_none()
            && self.receipt_date.is_none()
    }
}

async fn with_relations<C: ConnectionTrait>(conn: &C, packages: Vec<package::Model>) -> Result<Vec<PackageRecord>, DbErr> {
    let senders = packages.load_one(sender::Entity, conn).await?;
    let customers = packages.load_one(customer::Entity, conn).await?;
    Ok(packages
        .into_iter()
        .zip(senders)
        .zip(customers)
        .map(|((package, sender), customer)| PackageRecord { package, sender, customer })
        .collect())
}

async fn load<C: ConnectionTrait>(conn: &C, package: package::Model) -> Result<PackageRecord, DbErr> {
    let sender = package.find_related(sender::Entity).one(conn).await?;
    let customer = package.find_related(customer::Entity).one(conn).await?;
    Ok(PackageRecord { package, sender, customer })
}

#[derive(Clone)]
pub struct PackageService {
    db: DatabaseConnection,
    validator: Arc<Validator>,
}

impl PackageService {
    pub fn new(db: DatabaseConnection, validator: Arc<Validator>) -> Self { Self { db, validator } }
}

#[async_trait]
impl ResourceService for PackageService {
    const KIND: EntityKind = EntityKind::Package;
    type Record = PackageRecord;

    async fn list(&self) -> Result<Vec<PackageRecord>, ServiceError> {
        let packages = package::Entity::find().order_by_asc(package::Column::CreatedAt).all(&self.db).await?;
        Ok(with_relations(&self.db, packages).await?)
    }

    async fn get(&self, id: Uuid) -> Result<PackageRecord, ServiceError> {
        let found = find_or_404::<package::Entity, _>(&self.db, Self::KIND, id).await?;
        Ok(load(&self.db, found).await?)
    }

    #[instrument(skip(self, input))]
    async fn create(&self, input: Input) -> Result<PackageRecord, ServiceError> {
        let txn = self.db.begin().await?;
        let data: CreatePackage = self.validator.validate_into(&txn, &schema(), &input, Mode::Create).await?;
        let ts = now();
        let created = package::ActiveModel {
            id: Set(Uuid::new_v4()),
            sender_id: Set(data.sender_id),
            customer_id: Set(data.customer_id),
            weight: Set(data.weight),
            package_type: Set(data.package_type),
            shipping_cost: Set(data.shipping_cost),
            receipt_date: Set(data.receipt_date),
            created_at: Set(ts),
            updated_at: Set(ts),
        }
        .insert(&txn)
        .await?;
        let record = load(&txn, created).await?;
        txn.commit().await?;
        info!(
            event = "package_created",
            id = %record.package.id,
            sender_id = %record.package.sender_id,
            customer_id = %record.package.customer_id
        );
        Ok(record)
    }

    #[instrument(skip(self, input), fields(id = %id))]
    async fn update(&self, id: Uuid, input: Input) -> Result<PackageRecord, ServiceError> {
        let txn = self.db.begin().await?;
        let existing = find_or_404::<package::Entity, _>(&txn, Self::KIND, id).await?;
        let data: UpdatePackage = self.validator.validate_into(&txn, &schema(), &input, Mode::Update { id }).await?;
        if data.is_empty() {
            let record = load(&txn, existing).await?;
            txn.commit().await?;
            return Ok(record);
        }

        let mut am: package::ActiveModel = existing.into();
        if let Some(sender_id) = data.sender_id { am.sender_id = Set(sender_id); }
        if let Some(customer_id) = data.customer_id { am.customer_id = Set(customer_id); }
        if let Some(weight) = data.weight { am.weight = Set(weight); }
        if let Some(package_type) = data.package_type { am.package_type = Set(package_type); }
        if let Some(shipping_cost) = data.shipping_cost { am.shipping_cost = Set(shipping_cost); }
        if let Some(receipt_date) = data.receipt_date { am.receipt_date = Set(receipt_date); }
        am.updated_at = Set(now());
        let updated = am.update(&txn).await?;
        let record = load(&txn, updated).await?;
        txn.commit().await?;
        info!(event = "package_updated", id = %id);
        Ok(record)
    }

    /// Cascades to the package's shipment.
    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        delete_by_id::<package::Entity>(&self.db, Self::KIND, id).await
    }
}
