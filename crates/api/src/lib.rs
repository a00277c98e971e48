//! HTTP API server for the order backend.
//!
//! Exposes the order lifecycle endpoints with structured logging
//! (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use gateway::PaymentGateway;
use metrics_exporter_prometheus::PrometheusHandle;
use orders::OrderService;
use store::{OrderStore, UserStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::orders::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S, G>(state: Arc<AppState<S, G>>, metrics_handle: PrometheusHandle) -> Router
where
    S: OrderStore + UserStore + 'static,
    G: PaymentGateway + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::ops::metrics))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::ops::health))
        .route("/api/order/place", post(routes::orders::place::<S, G>))
        .route("/api/order/verify", post(routes::orders::verify::<S, G>))
        .route(
            "/api/order/userorders",
            post(routes::orders::user_orders::<S, G>),
        )
        .route("/api/order/list", get(routes::orders::list::<S, G>))
        .route("/api/order/status", post(routes::orders::status::<S, G>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state over the given collaborators.
pub fn create_state<S, G>(store: S, gateway: G, base_url: impl Into<String>) -> Arc<AppState<S, G>>
where
    S: OrderStore + UserStore + 'static,
    G: PaymentGateway + 'static,
{
    Arc::new(AppState {
        order_service: OrderService::new(store, gateway, base_url),
    })
}
