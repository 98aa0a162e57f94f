//! Prometheus metrics for the storefront.
//!
//! All metric families live in a registry owned by [`ShopMetrics`] and are
//! recorded through its methods. The struct is cloned into whatever needs to
//! record (request middleware, checkout service) instead of being reached
//! through a global registry, so tests can assert on a private instance.

use axum::{extract::State, http::header, response::IntoResponse};
use prometheus::{
    CounterVec, Encoder, Histogram, HistogramOpts, HistogramVec, IntCounter, IntGauge, Opts,
    Registry, TextEncoder,
};
use std::collections::HashMap;
use thiserror::Error;

use crate::AppState;
use crate::error::AppError;

/// Histogram buckets for checkout order value, in currency units.
pub const CHECKOUT_VALUE_BUCKETS: &[f64] = &[0.0, 10.0, 20.0, 50.0, 100.0, 200.0, 500.0];

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("failed to register metric: {0}")]
    RegistrationFailed(#[from] prometheus::Error),

    #[error("failed to encode metrics: {0}")]
    EncodingFailed(String),
}

pub type MetricsResult<T> = Result<T, MetricsError>;

/// Storefront metrics, one registry per instance.
///
/// Counters accumulate monotonically; the last-checkout gauge is
/// last-write-wins. All inner types use interior mutability and the struct
/// is cheap to `Clone`.
#[derive(Clone)]
pub struct ShopMetrics {
    registry: Registry,

    /// HTTP request latency by method, matched route, and status code.
    http_request_duration: HistogramVec,

    /// Product detail views by product id.
    product_views: CounterVec,

    /// Add-to-cart actions by product id, incremented by quantity.
    add_to_cart: CounterVec,

    /// Completed checkouts.
    checkout_total: IntCounter,

    /// Order value distribution for completed checkouts.
    checkout_value: Histogram,

    /// Item count in the most recent checkout.
    checkout_items_last: IntGauge,
}

impl ShopMetrics {
    /// Creates the metric families and registers them under a registry
    /// carrying `app_name` as the `app` const label.
    ///
    /// # Errors
    ///
    /// Returns an error if any metric fails to register.
    pub fn new(app_name: &str) -> MetricsResult<Self> {
        let labels = HashMap::from([("app".to_string(), app_name.to_string())]);
        let registry = Registry::new_custom(None, Some(labels))?;

        let http_request_duration = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "Duration of HTTP requests in seconds",
            ),
            &["method", "route", "status_code"],
        )?;
        registry.register(Box::new(http_request_duration.clone()))?;

        let product_views = CounterVec::new(
            Opts::new("ecommerce_product_views_total", "Product detail views"),
            &["product_id"],
        )?;
        registry.register(Box::new(product_views.clone()))?;

        let add_to_cart = CounterVec::new(
            Opts::new("ecommerce_add_to_cart_total", "Add to cart actions"),
            &["product_id"],
        )?;
        registry.register(Box::new(add_to_cart.clone()))?;

        let checkout_total = IntCounter::new("ecommerce_checkout_total", "Checkout actions")?;
        registry.register(Box::new(checkout_total.clone()))?;

        let checkout_value = Histogram::with_opts(
            HistogramOpts::new("ecommerce_checkout_value", "Checkout order value")
                .buckets(CHECKOUT_VALUE_BUCKETS.to_vec()),
        )?;
        registry.register(Box::new(checkout_value.clone()))?;

        let checkout_items_last = IntGauge::new(
            "ecommerce_checkout_items_last",
            "Item count in the most recent checkout",
        )?;
        registry.register(Box::new(checkout_items_last.clone()))?;

        Ok(Self {
            registry,
            http_request_duration,
            product_views,
            add_to_cart,
            checkout_total,
            checkout_value,
            checkout_items_last,
        })
    }

    pub fn observe_http_request(&self, method: &str, route: &str, status: u16, latency_secs: f64) {
        self.http_request_duration
            .with_label_values(&[method, route, &status.to_string()])
            .observe(latency_secs);
    }

    pub fn product_viewed(&self, product_id: &str) {
        self.product_views.with_label_values(&[product_id]).inc();
    }

    pub fn cart_add(&self, product_id: &str, qty: i64) {
        self.add_to_cart
            .with_label_values(&[product_id])
            .inc_by(qty as f64);
    }

    /// Records a successful checkout: counter, value distribution, and the
    /// last-observed item count gauge.
    pub fn checkout_completed(&self, total: f64, item_count: i64) {
        self.checkout_total.inc();
        self.checkout_value.observe(total);
        self.checkout_items_last.set(item_count);
    }

    /// Completed-checkout count, for assertions in tests.
    #[must_use]
    pub fn checkout_count(&self) -> u64 {
        self.checkout_total.get()
    }

    #[must_use]
    pub fn cart_add_count(&self, product_id: &str) -> f64 {
        self.add_to_cart.with_label_values(&[product_id]).get()
    }

    /// Renders the registry in Prometheus text exposition format.
    pub fn encode_text(&self) -> MetricsResult<String> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .map_err(|e| MetricsError::EncodingFailed(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| MetricsError::EncodingFailed(e.to_string()))
    }
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let body = state
        .metrics
        .encode_text()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body))
}
