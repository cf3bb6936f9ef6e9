//! CRUD handlers shared by every entity, generic over [`ResourceService`].
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;
use service::{Input, ResourceService, ServiceError};
use tracing::info;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::response::{ApiResponse, Reply};

/// `/` and `/:id` for one entity, to be nested under its collection path.
pub fn resource_routes<S: ResourceService>(svc: Arc<S>) -> Router {
    Router::new()
        .route("/", get(list::<S>).post(create::<S>))
        .route("/:id", get(show::<S>).put(update::<S>).delete(destroy::<S>))
        .with_state(svc)
}

/// Ids that are not UUIDs cannot name a row, so they are simply not found.
fn parse_id<S: ResourceService>(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ServiceError::not_found(S::KIND).into())
}

fn body(payload: Result<Json<Value>, JsonRejection>) -> Result<Input, ApiError> {
    let Json(value) = payload?;
    Ok(Input::from_value(value)?)
}

async fn list<S: ResourceService>(State(svc): State<Arc<S>>) -> Result<Reply<Vec<S::Record>>, ApiError> {
    let rows = svc.list().await?;
    info!(event = "list", entity = %S::KIND, count = rows.len());
    Ok(Reply(StatusCode::OK, ApiResponse::ok(format!("{}s retrieved successfully", S::KIND.label()), rows)))
}

async fn show<S: ResourceService>(State(svc): State<Arc<S>>, Path(id): Path<String>) -> Result<Reply<S::Record>, ApiError> {
    let id = parse_id::<S>(&id)?;
    let row = svc.get(id).await?;
    Ok(Reply(StatusCode::OK, ApiResponse::ok(format!("{} retrieved successfully", S::KIND.label()), row)))
}

async fn create<S: ResourceService>(
    State(svc): State<Arc<S>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Reply<S::Record>, ApiError> {
    let created = svc.create(body(payload)?).await?;
    Ok(Reply(StatusCode::CREATED, ApiResponse::ok(format!("{} created successfully", S::KIND.label()), created)))
}

async fn update<S: ResourceService>(
    State(svc): State<Arc<S>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Reply<S::Record>, ApiError> {
    let id = parse_id::<S>(&id)?;
    let updated = svc.update(id, body(payload)?).await?;
    Ok(Reply(StatusCode::OK, ApiResponse::ok(format!("{} updated successfully", S::KIND.label()), updated)))
}

async fn destroy<S: ResourceService>(State(svc): State<Arc<S>>, Path(id): Path<String>) -> Result<Reply<()>, ApiError> {
    let id = parse_id::<S>(&id)?;
    svc.delete(id).await?;
    Ok(Reply(StatusCode::OK, ApiResponse::empty(format!("{} deleted successfully", S::KIND.label()))))
}
