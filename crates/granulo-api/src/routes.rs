//! Route table.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Builds the API router with request tracing.
pub fn router() -> Router {
    Router::new()
        .route("/calcular", post(handlers::calcular))
        .route("/gradation", post(handlers::gradation))
        .route("/sieves/standard", get(handlers::standard_sieves))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
}
