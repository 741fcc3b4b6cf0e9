//! Runner Bids site library.
//!
//! Serves the landing page with the bid form, forwards valid bids to the
//! bidding backend, and shows the confirmation page. Exposed as a library so
//! the router can be exercised in tests without binding a port.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::{Router, middleware::from_fn, routing::get};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{
    create_session_layer, request_id_middleware, security_headers_middleware,
};
use crate::state::AppState;

/// Build the full application router.
///
/// Sentry layers are not included; the binary wraps the router with them.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service(
            "/static",
            ServeDir::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
        )
        .fallback(error::not_found)
        // Outermost first: the trace span must exist before the request ID is recorded
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(|request: &axum::http::Request<_>| {
                            tracing::info_span!(
                                "http_request",
                                method = %request.method(),
                                uri = %request.uri(),
                                request_id = tracing::field::Empty,
                                status = tracing::field::Empty,
                                latency_ms = tracing::field::Empty,
                            )
                        })
                        .on_response(
                            |response: &axum::http::Response<_>,
                             latency: std::time::Duration,
                             span: &Span| {
                                span.record("status", response.status().as_u16());
                                span.record(
                                    "latency_ms",
                                    u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                                );
                                DefaultOnResponse::default().on_response(response, latency, span);
                            },
                        ),
                )
                .layer(from_fn(request_id_middleware))
                .layer(from_fn(security_headers_middleware))
                .layer(session_layer),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Does not check the bidding backend.
async fn health() -> &'static str {
    "ok"
}
