//! Router-level tests: every request goes through the full middleware stack
//! against a fresh in-memory database.
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use configs::AppConfig;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

async fn app() -> anyhow::Result<Router> {
    let mut cfg = AppConfig::default();
    cfg.database.url = "sqlite::memory:".into();
    server::build_app(&cfg).await
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let res = app.clone().oneshot(req.body(body)?).await?;
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, json))
}

async fn create(app: &Router, collection: &str, body: Value) -> anyhow::Result<Value> {
    let (status, res) = send(app, "POST", &format!("/api/{collection}"), Some(body)).await?;
    assert_eq!(status, StatusCode::CREATED, "create {collection}: {res}");
    Ok(res["data"].clone())
}

#[tokio::test]
async fn health_is_ok() -> anyhow::Result<()> {
    let app = app().await?;
    let (status, body) = send(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
    Ok(())
}

#[tokio::test]
async fn jane_doe_customer_flow() -> anyhow::Result<()> {
    let app = app().await?;
    let jane = json!({"name": "Jane Doe", "email": "jane@example.com"});

    let (status, body) = send(&app, "POST", "/api/customers", Some(jane.clone())).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Customer created successfully");
    assert_eq!(body["data"]["email"], "jane@example.com");
    assert!(Uuid::parse_str(body["data"]["id"].as_str().unwrap()).is_ok());

    let (status, body) = send(&app, "POST", "/api/customers", Some(jane)).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert_eq!(body["data"], Value::Null);
    assert_eq!(body["errors"]["email"][0], "The email has already been taken.");
    Ok(())
}

#[tokio::test]
async fn validation_lists_every_field() -> anyhow::Result<()> {
    let app = app().await?;
    let (status, body) = send(&app, "POST", "/api/couriers", Some(json!({"phone_number": "1".repeat(30)}))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let errors = body["errors"].as_object().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors["name"][0], "The name field is required.");
    assert_eq!(errors["phone_number"][0], "The phone number field must not be greater than 20 characters.");
    Ok(())
}

#[tokio::test]
async fn bodies_must_be_json_objects() -> anyhow::Result<()> {
    let app = app().await?;
    let (status, body) = send(&app, "POST", "/api/vendors", Some(json!(["not", "an", "object"]))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["body"].is_array());

    let req = Request::builder()
        .method("POST")
        .uri("/api/vendors")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{broken"))?;
    let res = app.clone().oneshot(req).await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

#[tokio::test]
async fn unknown_and_malformed_ids_are_404() -> anyhow::Result<()> {
    let app = app().await?;
    let (status, body) = send(&app, "GET", &format!("/api/senders/{}", Uuid::new_v4()), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Sender not found");

    let (status, _) = send(&app, "GET", "/api/senders/42", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "PUT", "/api/senders/42", Some(json!({"name": "x"}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", "/api/senders/42", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/api/orders", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn update_and_delete_sender() -> anyhow::Result<()> {
    let app = app().await?;
    let sender = create(&app, "senders", json!({"name": "Toko Makmur", "email": "toko@example.com"})).await?;
    let id = sender["id"].as_str().unwrap();

    let (status, body) = send(&app, "PUT", &format!("/api/senders/{id}"), Some(json!({"phone_number": "021-555"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Sender updated successfully");
    assert_eq!(body["data"]["phone_number"], "021-555");
    assert_eq!(body["data"]["email"], "toko@example.com");

    let (status, body) = send(&app, "PUT", &format!("/api/senders/{id}"), Some(json!({}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["phone_number"], "021-555");

    let (status, body) = send(&app, "DELETE", &format!("/api/senders/{id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "message": "Sender deleted successfully", "data": null}));

    let (status, body) = send(&app, "GET", "/api/senders", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    Ok(())
}

#[tokio::test]
async fn shipment_graph_over_http() -> anyhow::Result<()> {
    let app = app().await?;
    let sender = create(&app, "senders", json!({"name": "Toko Makmur"})).await?;
    let customer = create(&app, "customers", json!({"name": "Jane Doe", "email": "jane@example.com"})).await?;
    let package = create(
        &app,
        "packages",
        json!({
            "sender_id": sender["id"],
            "customer_id": customer["id"],
            "weight": "1.25",
            "package_type": "parcel",
            "shipping_cost": 18000,
            "receipt_date": "2025-05-30"
        }),
    )
    .await?;
    assert_eq!(package["weight"], 1.25);
    assert_eq!(package["sender"]["name"], "Toko Makmur");
    assert_eq!(package["customer"]["email"], "jane@example.com");

    let vendor = create(&app, "vendors", json!({"business_name": "JNE", "license_number": "LIC-1"})).await?;
    let courier = create(&app, "couriers", json!({"name": "Budi"})).await?;
    let shipment = create(
        &app,
        "shipments",
        json!({
            "package_id": package["id"],
            "vendor_id": vendor["id"],
            "courier_id": courier["id"],
            "tracking_number": "TRK-001",
            "status": "Pending"
        }),
    )
    .await?;
    assert_eq!(shipment["package"]["id"], package["id"]);
    assert_eq!(shipment["vendor"]["business_name"], "JNE");
    assert_eq!(shipment["delivery_date"], Value::Null);

    // vendor and courier are protected while the shipment exists
    let vendor_id = vendor["id"].as_str().unwrap();
    let (status, body) = send(&app, "DELETE", &format!("/api/vendors/{vendor_id}"), None).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    let courier_id = courier["id"].as_str().unwrap();
    let (status, _) = send(&app, "DELETE", &format!("/api/couriers/{courier_id}"), None).await?;
    assert_eq!(status, StatusCode::CONFLICT);

    // deleting the sender takes the package and its shipment with it
    let sender_id = sender["id"].as_str().unwrap();
    let (status, _) = send(&app, "DELETE", &format!("/api/senders/{sender_id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, "GET", "/api/shipments", None).await?;
    assert_eq!(body["message"], "Shipments retrieved successfully");
    assert_eq!(body["data"], json!([]));

    let (status, _) = send(&app, "DELETE", &format!("/api/vendors/{vendor_id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn dangling_package_references_are_422() -> anyhow::Result<()> {
    let app = app().await?;
    let (status, body) = send(
        &app,
        "POST",
        "/api/packages",
        Some(json!({
            "sender_id": Uuid::new_v4(),
            "customer_id": Uuid::new_v4(),
            "weight": 1,
            "package_type": "box",
            "shipping_cost": 1,
            "receipt_date": "2025-01-01"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["sender_id"][0], "The selected sender id is invalid.");
    assert_eq!(body["errors"]["customer_id"][0], "The selected customer id is invalid.");
    Ok(())
}
