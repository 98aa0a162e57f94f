use axum::{Json, extract::State, response::IntoResponse};

use crate::AppState;
use crate::error::AppError;

/// How many orders the operational listing returns.
pub const RECENT_ORDERS_LIMIT: i64 = 20;

pub async fn list_orders(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let orders = state.orders.list_recent(RECENT_ORDERS_LIMIT).await?;

    Ok(Json(orders))
}
