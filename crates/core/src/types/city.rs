//! City records served by the bidding backend.

use serde::{Deserialize, Serialize};

/// A city runners operate in.
///
/// The backend stores cities as documents, so the identifier arrives as
/// `_id` and the display name as `city_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name, also the value submitted with a bid.
    #[serde(rename = "city_name")]
    pub name: String,
}

impl City {
    /// Create a city record.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
