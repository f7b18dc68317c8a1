//! End-to-end flow: seed a store, then drive the router like a client would.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use pokedex_server::db::{MemoryStore, PokemonStore};
use pokedex_server::seed::{build_schema, populate, TypeRecord};
use pokedex_server::{build_router, AppState, ServerConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

const TYPES: &str = r#"[
    {"english": "Normal"}, {"english": "Fire"}, {"english": "Water"},
    {"english": "Grass"}, {"english": "Poison"}, {"english": "Electric"}
]"#;

async fn seeded_app() -> (Router, Arc<MemoryStore>) {
    let records: Vec<TypeRecord> = serde_json::from_str(TYPES).unwrap();
    let schema = build_schema(&records, "fixture").unwrap();

    let pokedex = vec![
        json!({"id": 1, "name": {"english": "Bulbasaur"}, "type": ["Grass", "Poison"],
               "base": {"HP": 45, "Attack": 49, "Defense": 49, "Sp. Attack": 65, "Sp. Defense": 65, "Speed": 45}}),
        json!({"id": 4, "name": {"english": "Charmander"}, "type": ["Fire"]}),
        json!({"id": 7, "name": {"english": "Squirtle"}, "type": ["Water"]}),
        json!({"id": 25, "name": {"english": "Pikachu"}, "type": ["Electric"]}),
        json!({"id": 999, "name": {"english": "Glitch"}, "type": ["Bird"]}),
    ];

    let store = Arc::new(MemoryStore::new());
    let report = populate(&*store, &schema, pokedex).await.unwrap();
    assert_eq!(report.inserted, 4);
    assert_eq!(report.rejected, 1);

    let state = AppState::new(store.clone(), schema);
    (build_router(state, &ServerConfig::default()), store)
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn seeded_collection_is_listed_in_id_order() {
    let (app, _) = seeded_app().await;

    let (status, body) = call(&app, "GET", "/api/v1/pokemons?count=2&after=1", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"]["english"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Charmander", "Squirtle"]);
}

#[tokio::test]
async fn full_record_lifecycle() {
    let (app, store) = seeded_app().await;

    let (status, _) = call(
        &app,
        "POST",
        "/api/v1/pokemon/",
        Some(json!({"id": 133, "name": {"english": "Eevee"}, "type": ["Normal"]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(
        &app,
        "PATCH",
        "/api/v1/pokemon/133",
        Some(json!({"base": {"HP": 55, "Speed": 55}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pokeInfo"]["name"]["english"], "Eevee");
    assert_eq!(body["pokeInfo"]["base"]["HP"], 55);

    let (status, body) = call(
        &app,
        "PUT",
        "/api/v1/pokemon/133",
        Some(json!({"id": 134, "name": {"english": "Vaporeon"}, "type": ["Water"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pokeInfo"]["id"], 134);
    assert!(body["pokeInfo"].get("base").is_none());

    let (status, _) = call(&app, "GET", "/api/v1/pokemon/133", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call(&app, "DELETE", "/api/v1/pokemon/134", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Deleted Successfully");

    assert_eq!(store.count().await.unwrap(), 4);
}

#[tokio::test]
async fn health_counts_seeded_records() {
    let (app, _) = seeded_app().await;
    let (status, body) = call(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["records"], 4);
}
