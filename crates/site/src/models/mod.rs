//! View and session models for the site.

pub mod session;
pub mod toast;

pub use session::keys as session_keys;
pub use toast::{Toast, ToastKind};
