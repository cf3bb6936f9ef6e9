use std::sync::Arc;

use async_trait::async_trait;
use models::{courier, now, EntityKind};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set, TransactionTrait};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{delete_by_id, find_or_404};
use crate::errors::ServiceError;
use crate::resource::ResourceService;
use crate::validation::{present, FieldRules, Input, Mode, Schema, Validator};

pub fn schema() -> Schema {
    Schema::new(
        EntityKind::Courier,
        vec![
            FieldRules::new("name").required().string().max(255),
            FieldRules::new("license_number")
                .nullable()
                .string()
                .max(255)
                .unique(EntityKind::Courier, "license_number"),
            FieldRules::new("vehicle_type").nullable().string().max(255),
            FieldRules::new("phone_number").nullable().string().max(20),
        ],
    )
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourier {
    pub name: String,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCourier {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub license_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub vehicle_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub phone_number: Option<Option<String>>,
}

impl UpdateCourier {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.license_number.is_none()
            && self.vehicle_type.is_none()
            && self.phone_number.is_none()
    }
}

#[derive(Clone)]
pub struct CourierService {
    db: DatabaseConnection,
    validator: Arc<Validator>,
}

impl CourierService {
    pub fn new(db: DatabaseConnection, validator: Arc<Validator>) -> Self { Self { db, validator } }
}

#[async_trait]
impl ResourceService for CourierService {
    const KIND: EntityKind = EntityKind::Courier;
    type Record = courier::Model;

    async fn list(&self) -> Result<Vec<courier::Model>, ServiceError> {
        Ok(courier::Entity::find().order_by_asc(courier::Column::CreatedAt).all(&self.db).await?)
    }

    async fn get(&self, id: Uuid) -> Result<courier::Model, ServiceError> {
        find_or_404::<courier::Entity, _>(&self.db, Self::KIND, id).await
    }

    #[instrument(skip(self, input))]
    async fn create(&self, input: Input) -> Result<courier::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let data: CreateCourier = self.validator.validate_into(&txn, &schema(), &input, Mode::Create).await?;
        let ts = now();
        let created = courier::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(data.name),
            license_number: Set(data.license_number),
            vehicle_type: Set(data.vehicle_type),
            phone_number: Set(data.phone_number),
            created_at: Set(ts),
            updated_at: Set(ts),
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;
        info!(event = "courier_created", id = %created.id);
        Ok(created)
    }

    #[instrument(skip(self, input), fields(id = %id))]
    async fn update(&self, id: Uuid, input: Input) -> Result<courier::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let existing = find_or_404::<courier::Entity, _>(&txn, Self::KIND, id).await?;
        let data: UpdateCourier = self.validator.validate_into(&txn, &schema(), &input, Mode::Update { id }).await?;
        if data.is_empty() {
            txn.commit().await?;
            return Ok(existing);
        }

        let mut am: courier::ActiveModel = existing.into();
        if let Some(name) = data.name { am.name = Set(name); }
        if let Some(license_number) = data.license_number { am.license_number = Set(license_number); }
        if let Some(vehicle_type) = data.vehicle_type { am.vehicle_type = Set(vehicle_type); }
        if let Some(phone_number) = data.phone_number { am.phone_number = Set(phone_number); }
        am.updated_at = Set(now());
        let updated = am.update(&txn).await?;
        txn.commit().await?;
        info!(event = "courier_updated", id = %id);
        Ok(updated)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        delete_by_id::<courier::Entity>(&self.db, Self::KIND, id).await
    }
}
