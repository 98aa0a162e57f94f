//! SQLite implementation of OrderRepository.

use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction as SqlxTransaction};

use crate::db::models::Order;
use crate::db::queries;
use crate::ports::{NewOrder, OrderRepository, RepositoryError, RepositoryResult};

/// SQLite-backed order ledger.
#[derive(Clone)]
pub struct SqliteOrderRepository {
    pool: SqlitePool,
}

impl SqliteOrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn write_order(
        tx: &mut SqlxTransaction<'_, Sqlite>,
        order: &NewOrder,
    ) -> RepositoryResult<i64> {
        let order_id =
            queries::insert_order(tx, order.created_at, order.total, order.item_count).await?;

        for item in &order.items {
            queries::insert_order_item(tx, order_id, &item.product_id, item.qty, item.price)
                .await?;
        }

        Ok(order_id)
    }
}

#[async_trait]
impl OrderRepository for SqliteOrderRepository {
    async fn create_order(&self, order: &NewOrder) -> RepositoryResult<i64> {
        let mut tx = self.pool.begin().await?;

        match Self::write_order(&mut tx, order).await {
            Ok(order_id) => {
                tx.commit().await?;
                Ok(order_id)
            }
            Err(err) => {
                // A rollback failure is logged but must not replace the
                // write error it was cleaning up after.
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!(error = %rollback_err, "checkout_rollback_failed");
                }
                Err(err)
            }
        }
    }

    async fn list_recent(&self, limit: i64) -> RepositoryResult<Vec<Order>> {
        queries::list_recent_orders(&self.pool, limit)
            .await
            .map_err(RepositoryError::from)
    }
}
