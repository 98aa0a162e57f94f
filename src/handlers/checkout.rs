use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;

use crate::AppState;
use crate::error::AppError;
use crate::services::CartLine;

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub items: Vec<CartLine>,
}

pub async fn checkout(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutRequest>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = state.checkout.checkout(&payload.items).await?;

    Ok(Json(json!({
        "ok": true,
        "total": outcome.total,
        "order_id": outcome.order_id,
    })))
}
