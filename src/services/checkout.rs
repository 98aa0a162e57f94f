//! Checkout use case: validate a cart against the catalog, compute the
//! total, and persist the order atomically.

use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::error::AppError;
use crate::metrics::ShopMetrics;
use crate::ports::{NewOrder, NewOrderItem, OrderRepository};

/// One cart line as submitted by the client. A missing `qty` deserializes
/// to zero and is rejected by validation; a fractional `qty` never gets past
/// the JSON boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct CartLine {
    pub id: String,
    #[serde(default)]
    pub qty: i64,
}

#[derive(Debug)]
pub struct CheckoutOutcome {
    pub order_id: i64,
    pub total: f64,
    pub item_count: i64,
}

#[derive(Clone)]
pub struct CheckoutService {
    catalog: Arc<Catalog>,
    orders: Arc<dyn OrderRepository>,
    metrics: ShopMetrics,
}

impl CheckoutService {
    pub fn new(
        catalog: Arc<Catalog>,
        orders: Arc<dyn OrderRepository>,
        metrics: ShopMetrics,
    ) -> Self {
        Self {
            catalog,
            orders,
            metrics,
        }
    }

    /// Validation is all-or-nothing: any invalid line rejects the whole cart
    /// before anything is written. On success the order and every line item
    /// commit as one unit.
    pub async fn checkout(&self, lines: &[CartLine]) -> Result<CheckoutOutcome, AppError> {
        if lines.is_empty() {
            return Err(AppError::Validation("cart is empty".to_string()));
        }

        let mut total = 0.0;
        let mut item_count = 0;
        let mut items = Vec::with_capacity(lines.len());

        for line in lines {
            let product = self.catalog.find(&line.id).ok_or_else(|| {
                AppError::Validation(format!("unknown product: {}", line.id))
            })?;

            if line.qty <= 0 {
                return Err(AppError::Validation(format!(
                    "quantity for {} must be greater than zero",
                    line.id
                )));
            }

            total += product.price * line.qty as f64;
            item_count += line.qty;
            items.push(NewOrderItem {
                product_id: product.id.clone(),
                qty: line.qty,
                price: product.price,
            });
        }

        let order = NewOrder {
            created_at: Utc::now(),
            total,
            item_count,
            items,
        };

        let order_id = self.orders.create_order(&order).await?;

        self.metrics.checkout_completed(total, item_count);
        tracing::info!(order_id, total, item_count, "checkout_completed");

        Ok(CheckoutOutcome {
            order_id,
            total,
            item_count,
        })
    }
}
