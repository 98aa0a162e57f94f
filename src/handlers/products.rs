use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::AppState;
use crate::error::AppError;

pub async fn list_products(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.catalog.products().to_vec())
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let product = state
        .catalog
        .find(&id)
        .ok_or_else(|| AppError::NotFound(format!("product {} not found", id)))?;

    state.metrics.product_viewed(&product.id);

    Ok(Json(product.clone()))
}
