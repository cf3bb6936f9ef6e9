use async_trait::async_trait;
use models::EntityKind;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::validation::Input;

/// CRUD contract shared by every entity, so the HTTP layer can stay generic.
///
/// Writes validate and persist inside one transaction; reads run on the
/// plain connection.
#[async_trait]
pub trait ResourceService: Send + Sync + 'static {
    const KIND: EntityKind;

    /// Row as returned to callers, relations included where the entity has them.
    type Record: Serialize + Send + Sync + 'static;

    /// All rows, oldest first.
    async fn list(&self) -> Result<Vec<Self::Record>, ServiceError>;

    async fn get(&self, id: Uuid) -> Result<Self::Record, ServiceError>;

    async fn create(&self, input: Input) -> Result<Self::Record, ServiceError>;

    /// Partial update; only supplied fields are validated and written.
    async fn update(&self, id: Uuid, input: Input) -> Result<Self::Record, ServiceError>;

    /// Fails with `Conflict` while other rows still reference the record.
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError>;
}
