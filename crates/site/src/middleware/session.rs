//! Session middleware configuration.
//!
//! Sessions only carry toasts across the post/redirect/get hop, so they live
//! in an in-process moka cache. Each record is evicted once its expiry date
//! passes, and the cache is capped at [`MAX_SESSIONS`] entries.

use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_moka_store::MokaStore;

use crate::config::SiteConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "rb_session";

/// Session expiry time in seconds (1 day).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Upper bound on sessions held in memory.
pub const MAX_SESSIONS: u64 = 100_000;

/// Create the session store.
#[must_use]
pub fn create_session_store() -> MokaStore {
    MokaStore::new(Some(MAX_SESSIONS))
}

/// Create the session layer backed by [`create_session_store`].
#[must_use]
pub fn create_session_layer(config: &SiteConfig) -> SessionManagerLayer<MokaStore> {
    SessionManagerLayer::new(create_session_store())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
