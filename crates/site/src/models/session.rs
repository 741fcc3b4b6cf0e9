//! Session-related types.

/// Session keys.
pub mod keys {
    /// Key for a toast to show on the next rendered page.
    pub const PENDING_TOAST: &str = "pending_toast";
}
