use std::sync::Arc;

use async_trait::async_trait;
use models::{now, vendor, EntityKind};
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
        EntityKind::Vendor,
        vec![
            FieldRules::new("business_name").required().string().max(255),
            FieldRules::new("license_number")
                .nullable()
                .string()
                .max(255)
                .unique(EntityKind::Vendor, "license_number"),
            FieldRules::new("address").nullable().string(),
        ],
    )
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateVendor {
    pub business_name: String,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateVendor {
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub license_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub address: Option<Option<String>>,
}

impl UpdateVendor {
    fn is_empty(&self) -> bool {
        self.business_name.is_none() && self.license_number.is_none() && self.address.is_none()
    }
}

#[derive(Clone)]
pub struct VendorService {
    db: DatabaseConnection,
    validator: Arc<Validator>,
}

impl VendorService {
    pub fn new(db: DatabaseConnection, validator: Arc<Validator>) -> Self { Self { db, validator } }
}

#[async_trait]
impl ResourceService for VendorService {
    const KIND: EntityKind = EntityKind::Vendor;
    type Record = vendor::Model;

    async fn list(&self) -> Result<Vec<vendor::Model>, ServiceError> {
        Ok(vendor::Entity::find().order_by_asc(vendor::Column::CreatedAt).all(&self.db).await?)
    }

    async fn get(&self, id: Uuid) -> Result<vendor::Model, ServiceError> {
        find_or_404::<vendor::Entity, _>(&self.db, Self::KIND, id).await
    }

    #[instrument(skip(self, input))]
    async fn create(&self, input: Input) -> Result<vendor::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let data: CreateVendor = self.validator.validate_into(&txn, &schema(), &input, Mode::Create).await?;
        let ts = now();
        let created = vendor::ActiveModel {
            id: Set(Uuid::new_v4()),
            business_name: Set(data.business_name),
            license_number: Set(data.license_number),
            address: Set(data.address),
            created_at: Set(ts),
            updated_at: Set(ts),
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;
        info!(event = "vendor_created", id = %created.id);
        Ok(created)
    }

    #[instrument(skip(self, input), fields(id = %id))]
    async fn update(&self, id: Uuid, input: Input) -> Result<vendor::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let existing = find_or_404::<vendor::Entity, _>(&txn, Self::KIND, id).await?;
        let data: UpdateVendor = self.validator.validate_into(&txn, &schema(), &input, Mode::Update { id }).await?;
        if data.is_empty() {
            txn.commit().await?;
            return Ok(existing);
        }

        let mut am: vendor::ActiveModel = existing.into();
        if let Some(business_name) = data.business_name { am.business_name = Set(business_name); }
        if let Some(license_number) = data.license_number { am.license_number = Set(license_number); }
        if let Some(address) = data.address { am.address = Set(address); }
        am.updated_at = Set(now());
        let updated = am.update(&txn).await?;
        txn.commit().await?;
        info!(event = "vendor_updated", id = %id);
        Ok(updated)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        delete_by_id::<vendor::Entity>(&self.db, Self::KIND, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{input, services};
    use serde_json::json;

    #[tokio::test]
    async fn license_number_can_be_resaved_by_its_owner() -> Result<(), anyhow::Error> {
        let svc = services().await?.vendors;
        let v = svc
            .create(input(json!({"business_name": "JNE Partner", "license_number": "LIC-001"})))
            .await?;
        let same = svc.update(v.id, input(json!({"license_number": "LIC-001"}))).await?;
        assert_eq!(same.license_number.as_deref(), Some("LIC-001"));
        Ok(())
    }

    #[tokio::test]
    async fn license_number_is_unique_across_vendors() -> Result<(), anyhow::Error> {
        let svc = services().await?.vendors;
        svc.create(input(json!({"business_name": "A", "license_number": "LIC-A"}))).await?;
        let b = svc.create(input(json!({"business_name": "B"}))).await?;

        let err = svc.create(input(json!({"business_name": "C", "license_number": "LIC-A"}))).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref e) if e.has("license_number", "unique")));

        let err = svc.update(b.id, input(json!({"license_number": "LIC-A"}))).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref e) if e.has("license_number", "unique")));
        Ok(())
    }

    #[tokio::test]
    async fn business_name_required_and_bounded() -> Result<(), anyhow::Error> {
        let svc = services().await?.vendors;
        let err = svc.create(input(json!({"business_name": "x".repeat(256)}))).await.unwrap_err();
        let ServiceError::Validation(errs) = err else { panic!("expected validation error") };
        assert_eq!(
            errs.get("business_name").unwrap()[0].message,
            "The business name field must not be greater than 255 characters."
        );
        Ok(())
    }

    #[tokio::test]
    async fn unused_vendor_can_be_deleted() -> Result<(), anyhow::Error> {
        let svc = services().await?.vendors;
        let v = svc.create(input(json!({"business_name": "Idle"}))).await?;
        svc.delete(v.id).await?;
        assert!(svc.list().await?.is_empty());
        Ok(())
    }
}
