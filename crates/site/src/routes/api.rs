//! JSON API route handlers.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use runner_bids_core::City;

use crate::error::Result;
use crate::state::AppState;

/// City list response, shaped like the backend's own `{ "data": [...] }`.
#[derive(Debug, Serialize)]
pub struct CitiesResponse {
    pub data: Vec<City>,
}

/// List the cities a bid can be placed in.
///
/// GET /api/cities
///
/// # Errors
///
/// Returns 502 if the backend cannot be reached or rejects the request.
#[instrument(skip(state))]
pub async fn cities(State(state): State<AppState>) -> Result<Json<CitiesResponse>> {
    let data = state.bid_api().list_cities().await?;
    Ok(Json(CitiesResponse { data }))
}
