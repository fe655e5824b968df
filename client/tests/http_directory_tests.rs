//! HTTP farm directory tests
//!
//! Runs the directory against a stub record API served by axum on a local
//! port, covering the status-code mapping of every operation.

use std::time::Duration;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use cropkeeper_client::{DirectoryError, FarmDirectory, HttpFarmDirectory};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use shared::{FarmId, FarmInput, SizeUnit};

fn farm_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "size": "12.5",
        "size_unit": "hectares",
        "location": "Valley Road",
        "created_at": "2024-03-01T08:00:00Z"
    })
}

fn not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": { "code": "NOT_FOUND", "message": "Farm not found" } })),
    )
        .into_response()
}

async fn list_farms() -> Json<Value> {
    Json(json!({ "farms": [farm_json(1, "North"), farm_json(2, "South")] }))
}

async fn create_farm(Json(input): Json<Value>) -> impl IntoResponse {
    let name = input["name"].as_str().unwrap_or_default().to_string();
    (StatusCode::CREATED, Json(farm_json(3, &name)))
}

async fn get_farm(Path(id): Path<String>) -> axum::response::Response {
    match id.as_str() {
        "1" => Json(farm_json(1, "North")).into_response(),
        "north/1" => Json(farm_json(9, "North Slope")).into_response(),
        _ => not_found(),
    }
}

async fn update_farm(Path(id): Path<String>, Json(input): Json<Value>) -> axum::response::Response {
    match id.as_str() {
        "1" => Json(farm_json(1, input["name"].as_str().unwrap_or_default())).into_response(),
        _ => not_found(),
    }
}

async fn delete_farm(Path(id): Path<String>) -> axum::response::Response {
    match id.as_str() {
        "1" => StatusCode::NO_CONTENT.into_response(),
        _ => not_found(),
    }
}

async fn spawn_api(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api/v1", addr)
}

async fn directory() -> HttpFarmDirectory {
    let app = Router::new()
        .route("/api/v1/farms", get(list_farms).post(create_farm))
        .route(
            "/api/v1/farms/:id",
            get(get_farm).put(update_farm).delete(delete_farm),
        );
    HttpFarmDirectory::new(spawn_api(app).await, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_list_parses_farms() {
    let farms = directory().await.list().await.unwrap();

    assert_eq!(farms.len(), 2);
    assert_eq!(farms[0].id.as_str(), "1");
    assert_eq!(farms[1].name, "South");
    assert_eq!(farms[0].size, Decimal::new(125, 1));
    assert_eq!(farms[0].size_unit, SizeUnit::Hectares);
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let directory = directory().await;

    assert_eq!(directory.get_by_id(&FarmId::new("1")).await.unwrap().name, "North");
    assert!(matches!(
        directory.get_by_id(&FarmId::new("42")).await,
        Err(DirectoryError::NotFound(id)) if id.as_str() == "42"
    ));
}

#[tokio::test]
async fn test_id_with_reserved_characters_stays_one_segment() {
    let directory = directory().await;

    let farm = directory.get_by_id(&FarmId::new("north/1")).await.unwrap();
    assert_eq!(farm.name, "North Slope");
    assert!(matches!(
        directory.get_by_id(&FarmId::new("1?x=2")).await,
        Err(DirectoryError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_create_and_update() {
    let directory = directory().await;

    let created = directory
        .create(FarmInput::new("East", Decimal::from(7)))
        .await
        .unwrap();
    assert_eq!(created.id.as_str(), "3");
    assert_eq!(created.name, "East");

    let updated = directory
        .update(&FarmId::new("1"), FarmInput::new("North Ridge", Decimal::from(7)))
        .await
        .unwrap();
    assert_eq!(updated.name, "North Ridge");

    assert!(matches!(
        directory
            .update(&FarmId::new("5"), FarmInput::new("Gone", Decimal::ONE))
            .await,
        Err(DirectoryError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_delete_maps_not_found_to_false() {
    let directory = directory().await;

    assert!(directory.delete(&FarmId::new("1")).await.unwrap());
    assert!(!directory.delete(&FarmId::new("2")).await.unwrap());
}

#[tokio::test]
async fn test_server_error_is_rejected_with_message() {
    async fn failing() -> impl IntoResponse {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": { "code": "DATABASE_ERROR", "message": "A database error occurred" } })),
        )
    }
    let base_url = spawn_api(Router::new().route("/api/v1/farms", get(failing))).await;
    let directory = HttpFarmDirectory::new(base_url, Duration::from_secs(5)).unwrap();

    match directory.list().await {
        Err(DirectoryError::Rejected { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "A database error occurred");
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body() {
    async fn garbage() -> &'static str {
        "not json"
    }
    let base_url = spawn_api(Router::new().route("/api/v1/farms", get(garbage))).await;
    let directory = HttpFarmDirectory::new(base_url, Duration::from_secs(5)).unwrap();

    assert!(matches!(directory.list().await, Err(DirectoryError::Malformed(_))));
}

#[tokio::test]
async fn test_unreachable_server() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let directory =
        HttpFarmDirectory::new(format!("http://{}/api/v1", addr), Duration::from_secs(2)).unwrap();

    assert!(matches!(directory.list().await, Err(DirectoryError::Unreachable(_))));
}
