use chrono::{DateTime, Utc};
use sqlx::{Result, Sqlite, SqlitePool, Transaction as SqlxTransaction};

use crate::db::models::{Order, OrderItem};

// --- Order Queries ---

/// Inserts one order row and returns its assigned id. Must run inside the
/// caller's transaction together with its item inserts.
pub async fn insert_order(
    executor: &mut SqlxTransaction<'_, Sqlite>,
    created_at: DateTime<Utc>,
    total: f64,
    item_count: i64,
) -> Result<i64> {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO orders (created_at, total, item_count) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(created_at)
    .bind(total)
    .bind(item_count)
    .fetch_one(&mut **executor)
    .await
}

pub async fn insert_order_item(
    executor: &mut SqlxTransaction<'_, Sqlite>,
    order_id: i64,
    product_id: &str,
    qty: i64,
    price: f64,
) -> Result<()> {
    sqlx::query("INSERT INTO order_items (order_id, product_id, qty, price) VALUES (?, ?, ?, ?)")
        .bind(order_id)
        .bind(product_id)
        .bind(qty)
        .bind(price)
        .execute(&mut **executor)
        .await?;

    Ok(())
}

/// Order summaries, newest first. Does not join line items.
pub async fn list_recent_orders(pool: &SqlitePool, limit: i64) -> Result<Vec<Order>> {
    sqlx::query_as::<_, Order>(
        "SELECT id, created_at, total, item_count FROM orders ORDER BY id DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn list_order_items(pool: &SqlitePool, order_id: i64) -> Result<Vec<OrderItem>> {
    sqlx::query_as::<_, OrderItem>(
        "SELECT id, order_id, product_id, qty, price FROM order_items WHERE order_id = ? ORDER BY id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await
}
