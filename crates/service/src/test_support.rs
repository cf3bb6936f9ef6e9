#![cfg(test)]
use std::sync::Arc;

use configs::DatabaseConfig;
use migration::MigratorTrait;
use models::db::connect_with_config;
use sea_orm::DatabaseConnection;

use crate::resources::Services;
use crate::validation::Validator;

/// Fresh in-memory database per test, migrated to the latest schema.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = DatabaseConfig { url: "sqlite::memory:".into(), ..DatabaseConfig::default() };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn services() -> Result<Services, anyhow::Error> {
    let db = get_db().await?;
    Ok(Services::new(db, Arc::new(Validator::default())))
}

/// Request body from a JSON literal; panics on non-objects.
pub fn input(value: serde_json::Value) -> crate::validation::Input {
    crate::validation::Input::from_value(value).expect("test body must be an object")
}
