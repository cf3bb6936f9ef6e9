use std::sync::Arc;

use async_trait::async_trait;
use models::{customer, now, EntityKind};
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
        EntityKind::Customer,
        vec![
            FieldRules::new("name").required().string().max(255),
            FieldRules::new("email")
                .required()
                .string()
                .email()
                .max(255)
                .unique(EntityKind::Customer, "email"),
            FieldRules::new("phone_number").nullable().string().max(20),
            FieldRules::new("address").nullable().string(),
        ],
    )
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomer {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCustomer {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub phone_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub address: Option<Option<String>>,
}

impl UpdateCustomer {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone_number.is_none() && self.address.is_none()
    }
}

#[derive(Clone)]
pub struct CustomerService {
    db: DatabaseConnection,
    validator: Arc<Validator>,
}

impl CustomerService {
    pub fn new(db: DatabaseConnection, validator: Arc<Validator>) -> Self { Self { db, validator } }
}

#[async_trait]
impl ResourceService for CustomerService {
    const KIND: EntityKind = EntityKind::Customer;
    type Record = customer::Model;

    async fn list(&self) -> Result<Vec<customer::Model>, ServiceError> {
        Ok(customer::Entity::find().order_by_asc(customer::Column::CreatedAt).all(&self.db).await?)
    }

    async fn get(&self, id: Uuid) -> Result<customer::Model, ServiceError> {
        find_or_404::<customer::Entity, _>(&self.db, Self::KIND, id).await
    }

    #[instrument(skip(self, input))]
    async fn create(&self, input: Input) -> Result<customer::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let data: CreateCustomer = self.validator.validate_into(&txn, &schema(), &input, Mode::Create).await?;
        let ts = now();
        let created = customer::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(data.name),
            email: Set(data.email),
            phone_number: Set(data.phone_number),
            address: Set(data.address),
            created_at: Set(ts),
            updated_at: Set(ts),
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;
        info!(event = "customer_created", id = %created.id);
        Ok(created)
    }

    #[instrument(skip(self, input), fields(id = %id))]
    async fn update(&self, id: Uuid, input: Input) -> Result<customer::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let existing = find_or_404::<customer::Entity, _>(&txn, Self::KIND, id).await?;
        let data: UpdateCustomer = self.validator.validate_into(&txn, &schema(), &input, Mode::Update { id }).await?;
        if data.is_empty() {
            txn.commit().await?;
            return Ok(existing);
        }

        let mut am: customer::ActiveModel = existing.into();
        if let Some(name) = data.name { am.name = Set(name); }
        if let Some(email) = data.email { am.email = Set(email); }
        if let Some(phone_number) = data.phone_number { am.phone_number = Set(phone_number); }
        if let Some(address) = data.address { am.address = Set(address); }
        am.updated_at = Set(now());
        let updated = am.update(&txn).await?;
        txn.commit().await?;
        info!(event = "customer_updated", id = %id);
        Ok(updated)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        delete_by_id::<customer::Entity>(&self.db, Self::KIND, id).await
    }
}
