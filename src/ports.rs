//! Storage-facing traits and the inputs they accept.
//! The checkout service talks to the order ledger through [`OrderRepository`]
//! so the persistence backend can be swapped out in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::db::models::Order;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: String,
    pub qty: i64,
    pub price: f64,
}

/// A fully validated order, ready to persist as one atomic unit.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub created_at: DateTime<Utc>,
    pub total: f64,
    pub item_count: i64,
    pub items: Vec<NewOrderItem>,
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persists the order row plus every line item in a single transaction
    /// and returns the assigned order id. Either all rows commit or none do.
    async fn create_order(&self, order: &NewOrder) -> RepositoryResult<i64>;

    /// Order summaries, newest first, without line items.
    async fn list_recent(&self, limit: i64) -> RepositoryResult<Vec<Order>>;
}
