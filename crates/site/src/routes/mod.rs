//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Landing page with the bid form
//! POST /bids             - Validate and submit a bid (rate limited)
//! GET  /order/success    - Bid confirmation page
//! GET  /api/cities       - City list as JSON
//! GET  /health           - Health check
//! ```

pub mod api;
pub mod home;
pub mod order;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::bid_rate_limiter;
use crate::state::AppState;

/// Path of the bid confirmation page.
pub const ORDER_SUCCESS_PATH: &str = "/order/success";

/// Path of the runner signup flow (served elsewhere).
pub const RUNNER_SIGNUP_PATH: &str = "/runners/signup";

/// Create the bid submission router.
pub fn bid_routes() -> Router<AppState> {
    Router::new()
        .route("/bids", post(home::submit_bid))
        .layer(bid_rate_limiter())
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Landing page
        .route("/", get(home::home))
        // Bid submission
        .merge(bid_routes())
        // Confirmation
        .route(ORDER_SUCCESS_PATH, get(order::success))
        // JSON API
        .route("/api/cities", get(api::cities))
}
