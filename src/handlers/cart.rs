use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;

use crate::AppState;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct AddToCartPayload {
    pub id: String,
    #[serde(default)]
    pub qty: i64,
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    Json(payload): Json<AddToCartPayload>,
) -> Result<impl IntoResponse, AppError> {
    let product = state
        .catalog
        .find(&payload.id)
        .ok_or_else(|| AppError::Validation("invalid payload".to_string()))?;

    if payload.qty <= 0 {
        return Err(AppError::Validation("invalid payload".to_string()));
    }

    state.metrics.cart_add(&product.id, payload.qty);
    tracing::info!(product_id = %product.id, qty = payload.qty, "add_to_cart");

    Ok(Json(json!({"ok": true})))
}
