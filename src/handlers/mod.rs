pub mod cart;
pub mod checkout;
pub mod orders;
pub mod products;

use axum::Json;
use serde_json::{Value, json};

pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}
