//! Services used by the route handlers.
//!
//! # Services
//!
//! - `bid_api` - Client for the bidding backend (cities, bid creation)

pub mod bid_api;

pub use bid_api::{BidApiClient, BidApiError};
