pub mod adapters;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod ports;
pub mod services;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::adapters::SqliteOrderRepository;
use crate::catalog::Catalog;
use crate::metrics::{MetricsResult, ShopMetrics};
use crate::ports::OrderRepository;
use crate::services::CheckoutService;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub orders: Arc<dyn OrderRepository>,
    pub checkout: CheckoutService,
    pub metrics: ShopMetrics,
}

impl AppState {
    /// Wires the catalog, SQLite-backed order ledger, checkout service, and
    /// metrics registry together.
    pub fn new(pool: SqlitePool, catalog: Catalog, app_name: &str) -> MetricsResult<Self> {
        let catalog = Arc::new(catalog);
        let metrics = ShopMetrics::new(app_name)?;
        let orders: Arc<dyn OrderRepository> = Arc::new(SqliteOrderRepository::new(pool));
        let checkout = CheckoutService::new(catalog.clone(), orders.clone(), metrics.clone());

        Ok(Self {
            catalog,
            orders,
            checkout,
            metrics,
        })
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/api/products", get(handlers::products::list_products))
        .route("/api/product/:id", get(handlers::products::get_product))
        .route("/api/cart/add", post(handlers::cart::add_to_cart))
        .route("/api/checkout", post(handlers::checkout::checkout))
        .route("/api/orders", get(handlers::orders::list_orders))
        .route("/health", get(handlers::health))
        .route("/metrics", get(metrics::metrics_handler))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::request_logger::request_logger_middleware,
        ))
        .with_state(state)
}
