//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::services::{BidApiClient, BidApiError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the backend client and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    bid_api: BidApiClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend HTTP client cannot be built.
    pub fn new(config: SiteConfig) -> Result<Self, BidApiError> {
        let bid_api = BidApiClient::new(&config.bid_api)?;

        Ok(Self {
            inner: Arc::new(AppStateInner { config, bid_api }),
        })
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the bidding backend client.
    #[must_use]
    pub fn bid_api(&self) -> &BidApiClient {
        &self.inner.bid_api
    }
}
