use reqwest::StatusCode;
use serde_json::json;
use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::path::Path;

use market_lane::{AppState, catalog, create_app};

async fn setup_test_app() -> (String, SqlitePool, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let options = SqliteConnectOptions::new()
        .filename(dir.path().join("app.db"))
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .unwrap();

    let migrator = Migrator::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations"))
        .await
        .unwrap();
    migrator.run(&pool).await.unwrap();

    let state = AppState::new(pool.clone(), catalog::default_catalog(), "ecommerce-test").unwrap();
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), pool, dir)
}

#[tokio::test]
async fn test_list_products() {
    let (base_url, _pool, _dir) = setup_test_app().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/products", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let products: Vec<serde_json::Value> = res.json().await.unwrap();
    assert_eq!(products.len(), 3);
    assert!(
        products
            .iter()
            .any(|product| product["id"] == "copper-mug" && product["price"] == 12.5)
    );
}

#[tokio::test]
async fn test_get_product_by_id() {
    let (base_url, _pool, _dir) = setup_test_app().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/product/linen-tote", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let product: serde_json::Value = res.json().await.unwrap();
    assert_eq!(product["name"], "Linen Tote");
    assert_eq!(product["price"], 18.0);
    assert_eq!(product["badge"], "Everyday");
}

#[tokio::test]
async fn test_get_unknown_product_is_not_found() {
    let (base_url, _pool, _dir) = setup_test_app().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/product/unknown-sku", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("unknown-sku"));
}

#[tokio::test]
async fn test_add_to_cart() {
    let (base_url, _pool, _dir) = setup_test_app().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/cart/add", base_url))
        .json(&json!({"id": "copper-mug", "qty": 2}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_add_to_cart_rejects_invalid_payloads() {
    let (base_url, _pool, _dir) = setup_test_app().await;
    let client = reqwest::Client::new();

    for payload in [
        json!({"id": "unknown-sku", "qty": 1}),
        json!({"id": "copper-mug", "qty": 0}),
        json!({"id": "copper-mug", "qty": -1}),
        json!({"id": "copper-mug"}),
    ] {
        let res = client
            .post(format!("{}/api/cart/add", base_url))
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "payload: {payload}");
    }
}

#[tokio::test]
async fn test_health() {
    let (base_url, _pool, _dir) = setup_test_app().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_metrics_exposition() {
    let (base_url, _pool, _dir) = setup_test_app().await;
    let client = reqwest::Client::new();

    // Generate some traffic first.
    client
        .get(format!("{}/api/product/copper-mug", base_url))
        .send()
        .await
        .unwrap();
    client
        .post(format!("{}/api/cart/add", base_url))
        .json(&json!({"id": "copper-mug", "qty": 2}))
        .send()
        .await
        .unwrap();
    client
        .post(format!("{}/api/checkout", base_url))
        .json(&json!({"items": [{"id": "copper-mug", "qty": 2}]}))
        .send()
        .await
        .unwrap();

    let res = client
        .get(format!("{}/metrics", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(
        res.headers()[reqwest::header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );

    let text = res.text().await.unwrap();
    assert!(text.contains("http_request_duration_seconds"));
    assert!(text.contains("ecommerce_product_views_total"));
    assert!(text.contains(r#"product_id="copper-mug""#));
    assert!(text.contains("ecommerce_add_to_cart_total"));
    assert!(text.contains("ecommerce_checkout_total"));
    assert!(text.contains("ecommerce_checkout_items_last"));
    assert!(text.contains(r#"app="ecommerce-test""#));
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let (base_url, _pool, _dir) = setup_test_app().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", base_url))
        .send()
        .await
        .unwrap();
    assert!(res.headers().contains_key("x-request-id"));

    let res = client
        .get(format!("{}/health", base_url))
        .header("x-request-id", "trace-me-42")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "trace-me-42");
}
