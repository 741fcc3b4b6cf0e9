//! HTTP middleware stack for the site.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with a `request_id` field)
//! 3. Request ID (fill the span field, echo `x-request-id`)
//! 4. Security headers (CSP, frame/referrer/isolation policies)
//! 5. Session layer (tower-sessions, moka store with expiry eviction)
//! 6. Rate limiting on bid submission (governor)

pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use rate_limit::bid_rate_limiter;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
