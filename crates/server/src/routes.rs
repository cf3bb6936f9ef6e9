pub mod resources;

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::{ResourceService, Services};

use crate::errors::ApiError;
use resources::resource_routes;

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn no_route() -> ApiError {
    ApiError::NotFound("Route not found".into())
}

fn mount<S: ResourceService>(api: Router, svc: Arc<S>) -> Router {
    api.nest(&format!("/{}", S::KIND.collection()), resource_routes(svc))
}

/// Build the full application router: health check plus one CRUD resource
/// per entity under `/api`.
pub fn build_router(services: Services, cors: CorsLayer) -> Router {
    let mut api = Router::new();
    api = mount(api, services.senders);
    api = mount(api, services.customers);
    api = mount(api, services.vendors);
    api = mount(api, services.couriers);
    api = mount(api, services.packages);
    api = mount(api, services.shipments);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .fallback(no_route)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
