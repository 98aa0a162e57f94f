use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One completed checkout. Immutable once committed.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub total: f64,
    pub item_count: i64,
}

/// One line within an order. `price` is the unit price captured at checkout
/// time, independent of later catalog changes.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: String,
    pub qty: i64,
    pub price: f64,
}
