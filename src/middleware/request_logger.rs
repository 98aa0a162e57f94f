use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::AppState;

/// Assigns or propagates `x-request-id`, logs request/response pairs inside
/// a span carrying the id, and feeds the HTTP duration histogram.
pub async fn request_logger_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let method = req.method().clone();
    let uri = req.uri().clone();
    // Matched route keeps the histogram's label cardinality bounded.
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| uri.path().to_owned());
    let start = Instant::now();

    let span = tracing::info_span!("http_request", request_id = %request_id);
    let mut response = async {
        tracing::info!(method = %method, uri = %uri, "Incoming request");

        let response = next.run(req).await;

        tracing::info!(
            method = %method,
            uri = %uri,
            status = %response.status().as_u16(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Outgoing response"
        );

        response
    }
    .instrument(span)
    .await;

    state.metrics.observe_http_request(
        method.as_str(),
        &route,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );

    response
        .headers_mut()
        .insert("x-request-id", request_id.parse().unwrap());

    response
}
