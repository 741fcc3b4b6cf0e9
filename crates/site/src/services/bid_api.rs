//! Bidding backend REST API client.
//!
//! Fetches the city list and submits bids on behalf of the landing page.
//! The city list is cached using `moka` for the configured TTL.

use std::sync::Arc;

use moka::future::Cache;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use runner_bids_core::{BidDraft, City};

use crate::config::BidApiConfig;

/// Path of the city list endpoint.
const CITIES_PATH: &str = "/cities";

/// Path of the bid creation endpoint.
const CREATE_BID_PATH: &str = "/customers/create-bid";

/// Cache key for the city list.
const CITIES_CACHE_KEY: &str = "cities";

/// Message shown when the backend gives no usable explanation.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Errors that can occur when talking to the bidding backend.
#[derive(Debug, Error)]
pub enum BidApiError {
    /// HTTP request failed (connection refused, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with something other than the expected status.
    #[error("API error: {status} - {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        status: u16,
        message: Option<String>,
    },
}

impl BidApiError {
    /// Text to show the user: the backend's own message when it sent one.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.as_str(),
            _ => FALLBACK_ERROR_MESSAGE,
        }
    }
}

/// Body of `GET /cities`.
#[derive(Debug, Deserialize)]
struct CitiesResponse {
    #[serde(default)]
    data: Option<Vec<City>>,
}

/// Error body returned by the backend, e.g. `{"message": "..."}` or
/// `{"message": ["...", "..."]}` for validation failures.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<ErrorMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

/// Extract the user-facing message from an error body.
///
/// A list yields its first element.
fn extract_error_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.message? {
        ErrorMessage::One(message) => Some(message),
        ErrorMessage::Many(messages) => messages.into_iter().next(),
    }
}

// =============================================================================
// BidApiClient
// =============================================================================

/// Client for the bidding backend.
///
/// Cheaply cloneable; clones share the HTTP connection pool and the city
/// cache.
#[derive(Clone)]
pub struct BidApiClient {
    inner: Arc<BidApiClientInner>,
}

struct BidApiClientInner {
    client: reqwest::Client,
    config: BidApiConfig,
    cities: Cache<String, Vec<City>>,
}

impl BidApiClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &BidApiConfig) -> Result<Self, BidApiError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        let cities = Cache::builder()
            .max_capacity(1)
            .time_to_live(config.city_cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(BidApiClientInner {
                client,
                config: config.clone(),
                cities,
            }),
        })
    }

    /// List the cities runners operate in.
    ///
    /// A response without a `data` list yields an empty list. Empty lists
    /// are not cached so the next page view tries again.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend answers with a
    /// non-success status.
    #[instrument(skip(self))]
    pub async fn list_cities(&self) -> Result<Vec<City>, BidApiError> {
        if let Some(cities) = self.inner.cities.get(CITIES_CACHE_KEY).await {
            debug!(count = cities.len(), "City list cache hit");
            return Ok(cities);
        }

        let url = self.inner.config.endpoint(CITIES_PATH);
        let response = self.inner.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BidApiError::Rejected {
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }

        let cities = response
            .json::<CitiesResponse>()
            .await?
            .data
            .unwrap_or_default();

        if !cities.is_empty() {
            self.inner
                .cities
                .insert(CITIES_CACHE_KEY.to_string(), cities.clone())
                .await;
        }

        debug!(count = cities.len(), "Fetched city list");
        Ok(cities)
    }

    /// Submit a bid.
    ///
    /// Only `201 Created` counts as success.
    ///
    /// # Errors
    ///
    /// Returns [`BidApiError::Rejected`] carrying the backend's message for
    /// any other status, or [`BidApiError::Http`] if the request fails.
    #[instrument(skip(self, draft), fields(city = %draft.city))]
    pub async fn create_bid(&self, draft: &BidDraft) -> Result<(), BidApiError> {
        let url = self.inner.config.endpoint(CREATE_BID_PATH);
        let response = self.inner.client.post(&url).json(draft).send().await?;
        let status = response.status();

        if status == StatusCode::CREATED {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(BidApiError::Rejected {
            status: status.as_u16(),
            message: extract_error_message(&body),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_string_message() {
        assert_eq!(
            extract_error_message(r#"{"message":"City not served","statusCode":400}"#),
            Some("City not served".to_string())
        );
    }

    #[test]
    fn test_extract_first_of_list() {
        assert_eq!(
            extract_error_message(
                r#"{"message":["email must be an email","name is too short"]}"#
            ),
            Some("email must be an email".to_string())
        );
    }

    #[test]
    fn test_extract_missing_or_malformed() {
        assert_eq!(extract_error_message(r#"{"error":"Bad Request"}"#), None);
        assert_eq!(extract_error_message(r#"{"message":[]}"#), None);
        assert_eq!(extract_error_message("<html>502</html>"), None);
        assert_eq!(extract_error_message(""), None);
    }

    #[test]
    fn test_user_message_prefers_backend_text() {
        let err = BidApiError::Rejected {
            status: 409,
            message: Some("You already have an open bid".to_string()),
        };
        assert_eq!(err.user_message(), "You already have an open bid");
    }

    #[test]
    fn test_user_message_fallback() {
        let err = BidApiError::Rejected {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message(), FALLBACK_ERROR_MESSAGE);

        let err = BidApiError::Rejected {
            status: 400,
            message: Some("  ".to_string()),
        };
        assert_eq!(err.user_message(), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn test_rejected_display() {
        let err = BidApiError::Rejected {
            status: 422,
            message: None,
        };
        assert_eq!(err.to_string(), "API error: 422 - no message");
    }
}
